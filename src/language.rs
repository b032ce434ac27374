//! Supported display languages and the static string tables.

use serde::{Deserialize, Serialize};

/// Display language of the interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Hindi.
    Hi,
    /// Marathi.
    Mr,
}

impl Language {
    /// Every language offered by the switcher, in menu order.
    pub const ALL: [Self; 3] = [Self::En, Self::Hi, Self::Mr];

    /// BCP-47 style tag passed to the conversational backend.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Mr => "mr",
        }
    }

    /// Native-script label shown in menus.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिंदी",
            Self::Mr => "मराठी",
        }
    }

    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Self::En => "🇺🇸",
            Self::Hi | Self::Mr => "🇮🇳",
        }
    }

    /// Parse a language code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Strings used by the landing-page demo overlay.
///
/// The demo only toggles between English and Hindi.
#[derive(Debug, Clone, Copy)]
pub struct DemoStrings {
    pub toggle_label: &'static str,
    pub queries_heading: &'static str,
    pub queries: [&'static str; 5],
    pub features_heading: &'static str,
    pub features: [&'static str; 3],
    pub placeholder: &'static str,
    pub disclaimer: &'static str,
    pub sample_question: &'static str,
    pub sample_answer: &'static str,
}

const DEMO_EN: DemoStrings = DemoStrings {
    toggle_label: "English",
    queries_heading: "Try These Queries",
    queries: [
        "How much water is left in Rajasthan?",
        "What will happen to Punjab in summer?",
        "Where should I drill a borewell in my district?",
        "Which areas had maximum decline in 5 years?",
        "How much does groundwater recharge after monsoon?",
    ],
    features_heading: "Features",
    features: ["Voice input supported", "Instant responses", "Export data"],
    placeholder: "Ask about groundwater...",
    disclaimer: "This is a demo. Visit dashboard for real-time data.",
    sample_question: "What's the groundwater level in Delhi?",
    sample_answer: "Delhi's groundwater level is concerning. It's declining at an average rate of 2.3 meters per year over the past 10 years. Currently, it ranges between 15-25 meters depth in most areas.",
};

const DEMO_HI: DemoStrings = DemoStrings {
    toggle_label: "हिंदी",
    queries_heading: "क्या करके देखें",
    queries: [
        "राजस्थान में कितना पानी बचा है?",
        "गर्मियों में पंजाब का क्या हाल होगा?",
        "मेरे जिले में नलकूप कहाँ लगाना चाहिए?",
        "पिछले 5 साल में कहाँ सबसे ज्यादा गिरावट हुई?",
        "बारिश के बाद भूजल कितना बढ़ता है?",
    ],
    features_heading: "खासियत",
    features: ["आवाज़ से पूछें", "तुरंत जवाब", "डेटा डाउनलोड"],
    placeholder: "अपना सवाल यहाँ लिखें...",
    disclaimer: "यह केवल डेमो है। वास्तविक डेटा के लिए डैशबोर्ड देखें।",
    sample_question: "दिल्ली में भूजल स्तर कैसा है?",
    sample_answer: "दिल्ली में भूजल स्तर चिंताजनक है। पिछले 10 वर्षों में औसतन 2.3 मीटर प्रति वर्ष की दर से गिरावट हो रही है। वर्तमान में यह 15-25 मीटर गहराई पर है।",
};

/// Demo strings for the English/Hindi toggle.
#[must_use]
pub fn demo_strings(hindi: bool) -> &'static DemoStrings {
    if hindi { &DEMO_HI } else { &DEMO_EN }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("hi"), Some(Language::Hi));
        assert_eq!(Language::from_code(" MR "), Some(Language::Mr));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn test_demo_tables_are_parallel() {
        let en = demo_strings(false);
        let hi = demo_strings(true);
        assert_eq!(en.queries.len(), hi.queries.len());
        assert_ne!(en.placeholder, hi.placeholder);
    }
}
