// UI locales and the string table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Hi,
    Kn,
    Te,
    Ta,
    Ml,
}

impl Lang {
    pub const ALL: [Lang; 6] = [Lang::En, Lang::Hi, Lang::Kn, Lang::Te, Lang::Ta, Lang::Ml];

    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Hi => "hi",
            Lang::Kn => "kn",
            Lang::Te => "te",
            Lang::Ta => "ta",
            Lang::Ml => "ml",
        }
    }

    /// Native-script name shown in the language picker and sent to the
    /// doctor service as the reply language.
    pub fn label(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Hi => "हिन्दी",
            Lang::Kn => "ಕನ್ನಡ",
            Lang::Te => "తెలుగు",
            Lang::Ta => "தமிழ்",
            Lang::Ml => "മലയാളം",
        }
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Lang::En => &EN,
            Lang::Hi => &HI,
            Lang::Kn => &KN,
            Lang::Te => &TE,
            Lang::Ta => &TA,
            Lang::Ml => &ML,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLang(pub String);

impl fmt::Display for UnknownLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language code: {}", self.0)
    }
}

impl std::error::Error for UnknownLang {}

impl FromStr for Lang {
    type Err = UnknownLang;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lang::ALL
            .into_iter()
            .find(|l| l.code() == s.trim())
            .ok_or_else(|| UnknownLang(s.to_string()))
    }
}

/// Translated UI strings for one locale.
#[derive(Debug)]
pub struct Strings {
    pub dashboard_title: &'static str,
    pub disease_scanner_title: &'static str,
    pub diseases_detected: &'static str,
    pub take_photo: &'static str,
    pub upload_photo: &'static str,
    pub analyze: &'static str,
    pub analyzing: &'static str,
    pub ai_doctor_title: &'static str,
    pub schemes_title: &'static str,
    pub search_schemes: &'static str,
    pub market_title: &'static str,
    pub weather_title: &'static str,
    pub climate_title: &'static str,
}

static EN: Strings = Strings {
    dashboard_title: "Farm Dashboard",
    disease_scanner_title: "Crop Disease Scanner",
    diseases_detected: "Diseases Detected",
    take_photo: "Take Photo",
    upload_photo: "Upload Photo",
    analyze: "Analyze",
    analyzing: "Analyzing...",
    ai_doctor_title: "AI Crop Doctor",
    schemes_title: "Government Schemes",
    search_schemes: "Search schemes...",
    market_title: "Marketplace",
    weather_title: "Weather",
    climate_title: "Climate Insight",
};

static HI: Strings = Strings {
    dashboard_title: "खेत डैशबोर्ड",
    disease_scanner_title: "फसल रोग स्कैनर",
    diseases_detected: "पहचाने गए रोग",
    take_photo: "फोटो लें",
    upload_photo: "फोटो अपलोड करें",
    analyze: "विश्लेषण करें",
    analyzing: "विश्लेषण हो रहा है...",
    ai_doctor_title: "एआई फसल डॉक्टर",
    schemes_title: "सरकारी योजनाएं",
    search_schemes: "योजनाएं खोजें...",
    market_title: "बाज़ार",
    weather_title: "मौसम",
    climate_title: "जलवायु जानकारी",
};

static KN: Strings = Strings {
    dashboard_title: "ಕೃಷಿ ಡ್ಯಾಶ್‌ಬೋರ್ಡ್",
    disease_scanner_title: "ಬೆಳೆ ರೋಗ ಸ್ಕ್ಯಾನರ್",
    diseases_detected: "ಪತ್ತೆಯಾದ ರೋಗಗಳು",
    take_photo: "ಫೋಟೋ ತೆಗೆಯಿರಿ",
    upload_photo: "ಫೋಟೋ ಅಪ್‌ಲೋಡ್ ಮಾಡಿ",
    analyze: "ವಿಶ್ಲೇಷಿಸಿ",
    analyzing: "ವಿಶ್ಲೇಷಿಸಲಾಗುತ್ತಿದೆ...",
    ai_doctor_title: "ಎಐ ಬೆಳೆ ವೈದ್ಯ",
    schemes_title: "ಸರ್ಕಾರಿ ಯೋಜನೆಗಳು",
    search_schemes: "ಯೋಜನೆಗಳನ್ನು ಹುಡುಕಿ...",
    market_title: "ಮಾರುಕಟ್ಟೆ",
    weather_title: "ಹವಾಮಾನ",
    climate_title: "ವಾತಾವರಣ ಒಳನೋಟ",
};

static TE: Strings = Strings {
    dashboard_title: "వ్యవసాయ డాష్‌బోర్డ్",
    disease_scanner_title: "పంట వ్యాధి స్కానర్",
    diseases_detected: "గుర్తించిన వ్యాధులు",
    take_photo: "ఫోటో తీయండి",
    upload_photo: "ఫోటో అప్‌లోడ్ చేయండి",
    analyze: "విశ్లేషించండి",
    analyzing: "విశ్లేషిస్తోంది...",
    ai_doctor_title: "ఏఐ పంట వైద్యుడు",
    schemes_title: "ప్రభుత్వ పథకాలు",
    search_schemes: "పథకాలను వెతకండి...",
    market_title: "మార్కెట్",
    weather_title: "వాతావరణం",
    climate_title: "వాతావరణ అంతర్దృష్టి",
};

static TA: Strings = Strings {
    dashboard_title: "பண்ணை டாஷ்போர்டு",
    disease_scanner_title: "பயிர் நோய் ஸ்கேனர்",
    diseases_detected: "கண்டறியப்பட்ட நோய்கள்",
    take_photo: "புகைப்படம் எடு",
    upload_photo: "புகைப்படம் பதிவேற்று",
    analyze: "பகுப்பாய்வு செய்",
    analyzing: "பகுப்பாய்வு நடக்கிறது...",
    ai_doctor_title: "ஏஐ பயிர் மருத்துவர்",
    schemes_title: "அரசு திட்டங்கள்",
    search_schemes: "திட்டங்களைத் தேடு...",
    market_title: "சந்தை",
    weather_title: "வானிலை",
    climate_title: "காலநிலை பார்வை",
};

static ML: Strings = Strings {
    dashboard_title: "കൃഷി ഡാഷ്ബോർഡ്",
    disease_scanner_title: "വിള രോഗ സ്കാനർ",
    diseases_detected: "കണ്ടെത്തിയ രോഗങ്ങൾ",
    take_photo: "ഫോട്ടോ എടുക്കുക",
    upload_photo: "ഫോട്ടോ അപ്‌ലോഡ് ചെയ്യുക",
    analyze: "വിശകലനം ചെയ്യുക",
    analyzing: "വിശകലനം ചെയ്യുന്നു...",
    ai_doctor_title: "എഐ വിള ഡോക്ടർ",
    schemes_title: "സർക്കാർ പദ്ധതികൾ",
    search_schemes: "പദ്ധതികൾ തിരയുക...",
    market_title: "വിപണി",
    weather_title: "കാലാവസ്ഥ",
    climate_title: "കാലാവസ്ഥാ വിശകലനം",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_for_all_locales() {
        for lang in Lang::ALL {
            assert_eq!(lang.code().parse::<Lang>().unwrap(), lang);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        let err = "fr".parse::<Lang>().unwrap_err();
        assert_eq!(err, UnknownLang("fr".into()));
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Lang::Kn).unwrap(), "\"kn\"");
        let lang: Lang = serde_json::from_str("\"ml\"").unwrap();
        assert_eq!(lang, Lang::Ml);
    }

    #[test]
    fn test_every_locale_has_strings() {
        for lang in Lang::ALL {
            let s = lang.strings();
            assert!(!s.disease_scanner_title.is_empty());
            assert!(!s.search_schemes.is_empty());
        }
        assert_eq!(Lang::En.strings().disease_scanner_title, "Crop Disease Scanner");
        assert_eq!(Lang::default(), Lang::En);
    }
}
