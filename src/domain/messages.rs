//! Localized strings announced or shown by the core.
//!
//! Every key has an entry for every language; adding either a key or a
//! language fails to compile until the table is complete.

use serde::{Deserialize, Serialize};

use crate::domain::settings::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    OfflineTitle,
    OfflineMessage,
    OnlineTitle,
    BackOnline,
    CameraReady,
    Processing,
    RecognitionSuccess,
    RecognitionError,
    ErrorTitle,
    VoicePreview,
}

impl MessageKey {
    pub const ALL: [MessageKey; 10] = [
        MessageKey::OfflineTitle,
        MessageKey::OfflineMessage,
        MessageKey::OnlineTitle,
        MessageKey::BackOnline,
        MessageKey::CameraReady,
        MessageKey::Processing,
        MessageKey::RecognitionSuccess,
        MessageKey::RecognitionError,
        MessageKey::ErrorTitle,
        MessageKey::VoicePreview,
    ];
}

/// Look up `key` in `language`.
pub fn message(key: MessageKey, language: Language) -> &'static str {
    use Language::*;
    use MessageKey::*;

    match (key, language) {
        (OfflineTitle, English) => "You're Offline",
        (OfflineTitle, Hindi) => "आप ऑफलाइन हैं",
        (OfflineTitle, Tamil) => "நீங்கள் ஆஃப்லைனில் உள்ளீர்கள்",
        (OfflineTitle, Telugu) => "మీరు ఆఫ్‌లైన్‌లో ఉన్నారు",
        (OfflineTitle, Bengali) => "আপনি অফলাইনে আছেন",

        (OfflineMessage, English) => "Please check your connection and try again",
        (OfflineMessage, Hindi) => "कृपया अपने कनेक्शन की जाँच करें और पुनः प्रयास करें",
        (OfflineMessage, Tamil) => "உங்கள் இணைப்பைச் சரிபார்த்து மீண்டும் முயற்சிக்கவும்",
        (OfflineMessage, Telugu) => "దయచేసి మీ కనెక్షన్‌ని తనిఖీ చేసి మళ్లీ ప్రయత్నించండి",
        (OfflineMessage, Bengali) => "আপনার সংযোগ পরীক্ষা করুন এবং আবার চেষ্টা করুন",

        (OnlineTitle, English) => "You're Back Online",
        (OnlineTitle, Hindi) => "आप वापस ऑनलाइन हैं",
        (OnlineTitle, Tamil) => "நீங்கள் ஆன்லைனுக்கு திரும்பி விட்டீர்கள்",
        (OnlineTitle, Telugu) => "మీరు తిరిగి ఆన్‌లైన్‌లో ఉన్నారు",
        (OnlineTitle, Bengali) => "আপনি আবার অনলাইনে ফিরে এসেছেন",

        (BackOnline, English) => "Connection restored",
        (BackOnline, Hindi) => "कनेक्शन पुनर्स्थापित",
        (BackOnline, Tamil) => "இணைப்பு மீட்டமைக்கப்பட்டது",
        (BackOnline, Telugu) => "కనెక్షన్ పునరుద్ధరించబడింది",
        (BackOnline, Bengali) => "সংযোগ পুনরুদ্ধার করা হয়েছে",

        (CameraReady, English) => {
            "Camera is ready. Position the banknote in the frame and tap to capture."
        }
        (CameraReady, Hindi) => {
            "कैमरा तैयार है। नोट को फ्रेम में रखें और कैप्चर करने के लिए टैप करें।"
        }
        (CameraReady, Tamil) => "கேமரா தயாராக உள்ளது. நோட்டை பிரேமில் வைத்து தட்டவும்.",
        (CameraReady, Telugu) => {
            "కెమెరా సిద్ధంగా ఉంది. నోటును ఫ్రేమ్‌లో ఉంచి, క్యాప్చర్ చేయడానికి తాకండి."
        }
        (CameraReady, Bengali) => {
            "ক্যামেরা প্রস্তুত। নোটটি ফ্রেমে রাখুন এবং ক্যাপচার করতে ট্যাপ করুন।"
        }

        (Processing, English) => "Processing the image. Please wait.",
        (Processing, Hindi) => "छवि प्रोसेस हो रही है। कृपया प्रतीक्षा करें।",
        (Processing, Tamil) => "படத்தை செயலாக்குகிறது. தயவுசெய்து காத்திருக்கவும்.",
        (Processing, Telugu) => "చిత్రాన్ని ప్రాసెస్ చేస్తోంది. దయచేసి వేచి ఉండండి.",
        (Processing, Bengali) => "ছবি প্রসেস করা হচ্ছে। অনুগ্রহ করে অপেক্ষা করুন।",

        (RecognitionSuccess, English) => "Currency Recognized",
        (RecognitionSuccess, Hindi) => "मुद्रा की पहचान हो गई",
        (RecognitionSuccess, Tamil) => "நாணயம் அங்கீகரிக்கப்பட்டது",
        (RecognitionSuccess, Telugu) => "కరెన్సీ గుర్తించబడింది",
        (RecognitionSuccess, Bengali) => "মুদ্রা শনাক্ত করা হয়েছে",

        (RecognitionError, English) => {
            "Could not recognize the currency. Please try again with better lighting and positioning."
        }
        (RecognitionError, Hindi) => {
            "मुद्रा की पहचान नहीं हो सकी। कृपया बेहतर रोशनी और स्थिति के साथ पुनः प्रयास करें।"
        }
        (RecognitionError, Tamil) => {
            "நாணயத்தை அடையாளம் காண முடியவில்லை. சிறந்த ஒளி மற்றும் நிலைப்படுத்துதலுடன் மீண்டும் முயற்சிக்கவும்."
        }
        (RecognitionError, Telugu) => {
            "కరెన్సీని గుర్తించలేకపోయింది. దయచేసి మెరుగైన లైటింగ్ మరియు పొజిషనింగ్‌తో మళ్లీ ప్రయత్నించండి."
        }
        (RecognitionError, Bengali) => {
            "মুদ্রা শনাক্ত করা যায়নি। আরও ভালো আলো এবং অবস্থান সহ আবার চেষ্টা করুন।"
        }

        (ErrorTitle, English) => "Error",
        (ErrorTitle, Hindi) => "त्रुटि",
        (ErrorTitle, Tamil) => "பிழை",
        (ErrorTitle, Telugu) => "లోపం",
        (ErrorTitle, Bengali) => "ত্রুটি",

        (VoicePreview, English) => {
            "This is a test of the audio output. You can adjust the volume and speech rate to your preference."
        }
        (VoicePreview, Hindi) => {
            "यह ऑडियो आउटपुट का एक परीक्षण है। आप अपनी प्राथमिकता के अनुसार वॉल्यूम और स्पीच रेट को समायोजित कर सकते हैं।"
        }
        (VoicePreview, Tamil) => {
            "இது ஆடியோ அவுட்புட்டின் சோதனை. உங்கள் விருப்பத்திற்கு ஏற்ப ஒலி அளவு மற்றும் பேச்சு வேகத்தை நீங்கள் சரிசெய்யலாம்."
        }
        (VoicePreview, Telugu) => {
            "ఇది ఆడియో అవుట్‌పుట్ యొక్క పరీక్ష. మీరు మీ ప్రాధాన్యత ప్రకారం వాల్యూమ్ మరియు స్పీచ్ రేట్‌ను సర్దుబాటు చేసుకోవచ్చు."
        }
        (VoicePreview, Bengali) => {
            "এটি অডিও আউটপুটের একটি পরীক্ষা। আপনি আপনার পছন্দ অনুযায়ী ভলিউম এবং স্পিচ রেট সামঞ্জস্য করতে পারেন।"
        }
    }
}
