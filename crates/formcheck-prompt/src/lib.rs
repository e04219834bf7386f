//! Prompt templates for photo analysis
//!
//! Each variant is a fixed Hebrew instruction template with exactly one
//! substitution point (the user's context question) and a mandated
//! three-section Markdown output contract. Variant selection is a
//! configuration choice, never derived from the request itself.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Prompt template variant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptVariant {
    /// Exercise technique and posture critique
    #[default]
    FitnessTechnique,
    /// Clinical-style nonverbal profile with a numeric confidence score
    BehavioralProfile,
    /// Cautious nonverbal commentary with anti-stereotyping guardrails
    BehavioralBalanced,
}

impl PromptVariant {
    /// Hebrew display label (GUI)
    pub fn label(&self) -> &'static str {
        match self {
            PromptVariant::FitnessTechnique => "טכניקת אימון",
            PromptVariant::BehavioralProfile => "פרופיל התנהגותי",
            PromptVariant::BehavioralBalanced => "שפת גוף מאוזנת",
        }
    }

    fn template(&self) -> &'static Template {
        match self {
            PromptVariant::FitnessTechnique => &FITNESS_TECHNIQUE,
            PromptVariant::BehavioralProfile => &BEHAVIORAL_PROFILE,
            PromptVariant::BehavioralBalanced => &BEHAVIORAL_BALANCED,
        }
    }
}

impl std::fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptVariant::FitnessTechnique => write!(f, "fitness-technique"),
            PromptVariant::BehavioralProfile => write!(f, "behavioral-profile"),
            PromptVariant::BehavioralBalanced => write!(f, "behavioral-balanced"),
        }
    }
}

/// One mandated output section: fixed heading plus required-content description
struct Section {
    heading: &'static str,
    body: &'static str,
}

/// Fixed template skeleton for one variant
struct Template {
    persona: &'static str,
    sections: [Section; 3],
    fallback_question: &'static str,
}

/// Response format mandate shared by every variant
const RESPONSE_FORMAT_LINE: &str =
    "החזר תשובה בפורמט Markdown, בעברית, **בדיוק בשלושה סעיפים** עם הכותרות הבאות:";

/// Lead-in for the quoted context question
const QUESTION_LEAD: &str = "התאם את הניתוח לשאלת הקונטקסט הבאה:";

const FITNESS_TECHNIQUE: Template = Template {
    persona: "אתה מאמן כושר מוסמך ומומחה לניתוח טכניקת תרגילים ויציבה. עליך לנתח את התמונה שסופקה.
אם התמונה מציגה אדם מבצע תרגיל, התמקד בטכניקה. אם זו תמונת פרופיל כללית, התמקד בניתוח הרכב גוף ויציבה.",
    sections: [
        Section {
            heading: "### א. ניתוח טכניקה ודיוק ביצוע",
            body: "תאר:
- הערך את ביצוע התרגיל (או היציבה הכללית) והצבע על טעויות קריטיות (כגון: גב עגול, ברכיים נופלות פנימה, עומס על מפרק).
- נתח את זוויות המפרקים המרכזיות (ירך, ברך, קרסול).",
        },
        Section {
            heading: "### ב. הערכת הרכב גוף ופיתוח שרירים",
            body: "תאר:
- באופן כללי בלבד, נתח אילו קבוצות שרירים נראות דומיננטיות ואילו טעונות שיפור (למשל: יציבה קדמית).
- ציין שהערכה זו אינה מדידה מדויקת אלא רק הערכה ויזואלית כללית.",
        },
        Section {
            heading: "### ג. 3 המלצות לשיפור מיידי",
            body: "תן שלוש המלצות ספציפיות, מעשיות וממוקדות:
- המלצה 1: טכניקה (מה לשנות בביצוע).
- המלצה 2: יציבה/פיתוח (תרגיל משלים מומלץ).
- המלצה 3: בטיחות (טיפ למניעת פציעות).",
        },
    ],
    fallback_question: "אין שאלת קונטקסט נוספת. נתח את טכניקת התרגיל או היציבה באופן כללי.",
};

const BEHAVIORAL_PROFILE: Template = Template {
    persona: "אתה אנליסט מודיעין התנהגותי המתמחה בניתוח שפת גוף, מחוות והבעות פנים. עליך לנתח את התמונה שסופקה ולהפיק פרופיל התנהגותי של האדם המצולם.",
    sections: [
        Section {
            heading: "### א. ניתוח שפת גוף ומחוות",
            body: "תאר:
- נתח את התנוחה, מנח הידיים והכתפיים, וכיוון המבט.
- הצבע על מחוות בולטות ועל ההקשר ההתנהגותי שלהן.",
        },
        Section {
            heading: "### ב. הערכת מצב רגשי וכוונות",
            body: "תאר:
- הערך את המצב הרגשי הנצפה (ביטחון, מתח, פתיחות, הסתגרות).
- צרף ציון ביטחון מספרי (0-100) להערכה הכוללת.",
        },
        Section {
            heading: "### ג. 3 תובנות התנהגותיות מרכזיות",
            body: "תן שלוש תובנות ספציפיות וממוקדות:
- תובנה 1: דפוס שפת הגוף הדומיננטי.
- תובנה 2: האותות הלא-מילוליים הבולטים ביותר.
- תובנה 3: נקודה לתשומת לב בתקשורת עם האדם.",
        },
    ],
    fallback_question: "אין שאלת קונטקסט נוספת. נתח את שפת הגוף וההתנהגות הנצפית באופן כללי.",
};

const BEHAVIORAL_BALANCED: Template = Template {
    persona: "אתה יועץ לתקשורת בין-אישית המנתח שפת גוף באופן זהיר ומאוזן. עליך לנתח את התמונה שסופקה.
הימנע מהכללות ומסטריאוטיפים (מגדר, מוצא, גיל), הסתמך רק על מה שנראה בתמונה עצמה, וציין במפורש כאשר מסקנה היא השערה בלבד.",
    sections: [
        Section {
            heading: "### א. רושם כללי ותנוחה",
            body: "תאר:
- תאר את התנוחה הכללית ואת האווירה שהתמונה משדרת.
- הבחן בין תצפית ישירה לבין פרשנות.",
        },
        Section {
            heading: "### ב. הבעות פנים ומחוות",
            body: "תאר:
- תאר הבעות ומחוות הנראות לעין בלבד.
- ציין שמדובר ברושם ויזואלי רגעי ולא במדידה מדויקת של רגש או אופי.",
        },
        Section {
            heading: "### ג. 3 הצעות לשיפור התקשורת הלא-מילולית",
            body: "תן שלוש הצעות ספציפיות, מעשיות ומכבדות:
- הצעה 1: תנוחה (מה לחזק או לרכך).
- הצעה 2: קשר עין והבעה (התאמה להקשר).
- הצעה 3: מודעות (הרגל קטן לתרגול יומיומי).",
        },
    ],
    fallback_question: "אין שאלת קונטקסט נוספת. נתח את שפת הגוף באופן כללי וזהיר.",
};

/// Compose the full instruction prompt for one variant and one question.
///
/// The question is trimmed; when empty or whitespace-only, the variant's
/// fallback sentence is substituted instead. The substituted text always
/// appears verbatim inside `"""` quoting.
pub fn compose(variant: PromptVariant, question: &str) -> String {
    let template = variant.template();

    let question = question.trim();
    let question = if question.is_empty() {
        template.fallback_question
    } else {
        question
    };

    let mut prompt = String::new();
    prompt.push_str(template.persona);
    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_FORMAT_LINE);
    prompt.push('\n');

    for section in &template.sections {
        prompt.push('\n');
        prompt.push_str(section.heading);
        prompt.push('\n');
        prompt.push_str(section.body);
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(QUESTION_LEAD);
    prompt.push('\n');
    prompt.push_str(&format!("\"\"\"{}\"\"\"", question));
    prompt
}

/// The three mandated section headings of a variant, in output order
pub fn section_headings(variant: PromptVariant) -> [&'static str; 3] {
    let template = variant.template();
    [
        template.sections[0].heading,
        template.sections[1].heading,
        template.sections[2].heading,
    ]
}

/// The sentence substituted when no context question is supplied
pub fn fallback_question(variant: PromptVariant) -> &'static str {
    variant.template().fallback_question
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARIANTS: [PromptVariant; 3] = [
        PromptVariant::FitnessTechnique,
        PromptVariant::BehavioralProfile,
        PromptVariant::BehavioralBalanced,
    ];

    #[test]
    fn question_appears_verbatim_and_quoted() {
        let question = "נתח את טכניקת הדדליפט. האם אני משתמש מספיק ברגליים?";
        for variant in ALL_VARIANTS {
            let prompt = compose(variant, question);
            assert!(
                prompt.contains(&format!("\"\"\"{}\"\"\"", question)),
                "quoted question missing for {:?}",
                variant
            );
        }
    }

    #[test]
    fn question_is_trimmed_before_substitution() {
        let prompt = compose(PromptVariant::FitnessTechnique, "  האם הגב ישר?  \n");
        assert!(prompt.contains("\"\"\"האם הגב ישר?\"\"\""));
    }

    #[test]
    fn empty_question_substitutes_the_fallback_sentence() {
        for variant in ALL_VARIANTS {
            for question in ["", "   ", "\n\t "] {
                let prompt = compose(variant, question);
                let fallback = fallback_question(variant);
                assert!(
                    prompt.contains(&format!("\"\"\"{}\"\"\"", fallback)),
                    "fallback missing for {:?} with input {:?}",
                    variant,
                    question
                );
            }
        }
    }

    #[test]
    fn all_three_headings_appear_in_order() {
        for variant in ALL_VARIANTS {
            let prompt = compose(variant, "שאלה כלשהי");
            let [first, second, third] = section_headings(variant);

            let first_pos = prompt.find(first).expect("first heading missing");
            let second_pos = prompt.find(second).expect("second heading missing");
            let third_pos = prompt.find(third).expect("third heading missing");

            assert!(first_pos < second_pos, "headings out of order for {:?}", variant);
            assert!(second_pos < third_pos, "headings out of order for {:?}", variant);
        }
    }

    #[test]
    fn compose_is_deterministic() {
        for variant in ALL_VARIANTS {
            let first = compose(variant, "שאלה");
            let second = compose(variant, "שאלה");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn format_mandate_is_present() {
        for variant in ALL_VARIANTS {
            let prompt = compose(variant, "");
            assert!(prompt.contains("**בדיוק בשלושה סעיפים**"));
            assert!(prompt.contains("Markdown"));
        }
    }

    #[test]
    fn profile_variant_requests_a_confidence_score() {
        let prompt = compose(PromptVariant::BehavioralProfile, "");
        assert!(prompt.contains("ציון ביטחון מספרי (0-100)"));
    }

    #[test]
    fn balanced_variant_carries_guardrails() {
        let prompt = compose(PromptVariant::BehavioralBalanced, "");
        assert!(prompt.contains("הימנע מהכללות ומסטריאוטיפים"));
    }
}
