//! Language catalog and pre-translated UI labels
//! The catalog is fixed and ordered; its first entry is the source language

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// A supported display language
#[derive(Debug, Clone, Copy, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub flag: &'static str,
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl std::hash::Hash for Language {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

const LANGUAGES: [Language; 10] = [
    Language { code: "en", name: "English", native_name: "English", flag: "🇬🇧" },
    Language { code: "hi", name: "Hindi", native_name: "हिंदी", flag: "🇮🇳" },
    Language { code: "ta", name: "Tamil", native_name: "தமிழ்", flag: "🇮🇳" },
    Language { code: "bn", name: "Bengali", native_name: "বাংলা", flag: "🇮🇳" },
    Language { code: "te", name: "Telugu", native_name: "తెలుగు", flag: "🇮🇳" },
    Language { code: "mr", name: "Marathi", native_name: "मराठी", flag: "🇮🇳" },
    Language { code: "gu", name: "Gujarati", native_name: "ગુજરાતી", flag: "🇮🇳" },
    Language { code: "kn", name: "Kannada", native_name: "ಕನ್ನಡ", flag: "🇮🇳" },
    Language { code: "ml", name: "Malayalam", native_name: "മലയാളം", flag: "🇮🇳" },
    Language { code: "pa", name: "Punjabi", native_name: "ਪੰਜਾਬੀ", flag: "🇮🇳" },
];

/// All supported languages, in display order
pub fn list_languages() -> &'static [Language] {
    &LANGUAGES
}

/// The default language, also the source language of every literal in the UI
pub fn default_language() -> Language {
    LANGUAGES[0]
}

/// Look up a language by its code
pub fn find_by_code(code: &str) -> Option<Language> {
    LANGUAGES.iter().copied().find(|l| l.code == code)
}

const LABELS_EN: &[(&str, &str)] = &[
    ("projectName", "Project Name"),
    ("totalOutlay", "Total Outlay"),
    ("duration", "Duration"),
    ("status", "Status"),
    ("location", "Location"),
    ("objective", "Objective"),
    ("budgetBreakdown", "Budget Breakdown"),
    ("risks", "Risk Analysis"),
    ("redFlags", "Critical Red Flags"),
    ("discussionPoints", "Key Discussion Points"),
    ("swotAnalysis", "SWOT Analysis"),
    ("strengths", "Strengths"),
    ("weaknesses", "Weaknesses"),
    ("opportunities", "Opportunities"),
    ("threats", "Threats"),
    ("export", "Export"),
    ("save", "Save"),
    ("share", "Share"),
    ("search", "Search"),
    ("filter", "Filter"),
    ("loading", "Loading"),
    ("analyzing", "Analyzing"),
];

const LABELS_HI: &[(&str, &str)] = &[
    ("projectName", "परियोजना का नाम"),
    ("totalOutlay", "कुल परिव्यय"),
    ("duration", "अवधि"),
    ("status", "स्थिति"),
    ("location", "स्थान"),
    ("objective", "उद्देश्य"),
    ("budgetBreakdown", "बजट विवरण"),
    ("risks", "जोखिम विश्लेषण"),
    ("redFlags", "महत्वपूर्ण चेतावनियाँ"),
    ("discussionPoints", "मुख्य चर्चा बिंदु"),
    ("swotAnalysis", "SWOT विश्लेषण"),
    ("strengths", "ताकत"),
    ("weaknesses", "कमजोरियाँ"),
    ("opportunities", "अवसर"),
    ("threats", "खतरे"),
    ("export", "निर्यात"),
    ("save", "सहेजें"),
    ("share", "साझा करें"),
    ("search", "खोजें"),
    ("filter", "फ़िल्टर"),
    ("loading", "लोड हो रहा है"),
    ("analyzing", "विश्लेषण हो रहा है"),
];

const LABELS_TA: &[(&str, &str)] = &[
    ("projectName", "திட்டத்தின் பெயர்"),
    ("totalOutlay", "மொத்த செலவு"),
    ("duration", "காலம்"),
    ("status", "நிலை"),
    ("location", "இடம்"),
    ("objective", "நோக்கம்"),
    ("budgetBreakdown", "பட்ஜெட் விவரம்"),
    ("risks", "இடர் பகுப்பாய்வு"),
    ("redFlags", "முக்கிய எச்சரிக்கைகள்"),
    ("discussionPoints", "முக்கிய விவாத புள்ளிகள்"),
    ("swotAnalysis", "SWOT பகுப்பாய்வு"),
    ("strengths", "பலம்"),
    ("weaknesses", "பலவீனங்கள்"),
    ("opportunities", "வாய்ப்புகள்"),
    ("threats", "அச்சுறுத்தல்கள்"),
    ("export", "ஏற்றுமதி"),
    ("save", "சேமிக்கவும்"),
    ("share", "பகிர்"),
    ("search", "தேடல்"),
    ("filter", "வடிகட்டி"),
    ("loading", "ஏற்றுகிறது"),
    ("analyzing", "பகுப்பாய்வு செய்கிறது"),
];

const LABELS_BN: &[(&str, &str)] = &[
    ("projectName", "প্রকল্পের নাম"),
    ("totalOutlay", "মোট ব্যয়"),
    ("duration", "সময়কাল"),
    ("status", "অবস্থা"),
    ("location", "অবস্থান"),
    ("objective", "উদ্দেশ্য"),
    ("budgetBreakdown", "বাজেট বিবরণ"),
    ("risks", "ঝুঁকি বিশ্লেষণ"),
    ("redFlags", "গুরুত্বপূর্ণ সতর্কতা"),
    ("discussionPoints", "মূল আলোচনা পয়েন্ট"),
    ("swotAnalysis", "SWOT বিশ্লেষণ"),
    ("strengths", "শক্তি"),
    ("weaknesses", "দুর্বলতা"),
    ("opportunities", "সুযোগ"),
    ("threats", "হুমকি"),
    ("export", "রপ্তানি"),
    ("save", "সংরক্ষণ"),
    ("share", "শেয়ার"),
    ("search", "অনুসন্ধান"),
    ("filter", "ফিল্টার"),
    ("loading", "লোড হচ্ছে"),
    ("analyzing", "বিশ্লেষণ করা হচ্ছে"),
];

type LabelTable = HashMap<&'static str, HashMap<&'static str, &'static str>>;

/// Static label dictionary, never written at runtime
static COMMON_LABELS: Lazy<LabelTable> = Lazy::new(|| {
    [("en", LABELS_EN), ("hi", LABELS_HI), ("ta", LABELS_TA), ("bn", LABELS_BN)]
        .into_iter()
        .map(|(code, pairs)| (code, pairs.iter().copied().collect()))
        .collect()
});

fn lookup(language_code: &str, key: &str) -> Option<&'static str> {
    COMMON_LABELS
        .get(language_code)
        .and_then(|labels| labels.get(key))
        .copied()
}

/// Resolve a UI label: current language, then the default language, then the key itself
pub fn get_label<'a>(key: &'a str, language_code: &str) -> &'a str {
    lookup(language_code, key)
        .or_else(|| lookup(default_language().code, key))
        .unwrap_or(key)
}
