// Persona module: the closed set of expert identities the user can pick
// from, each tied to a fixed system instruction. Unknown labels never
// fail; they fall back to the generic assistant.

/// The expert identity that conditions the model's reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persona {
    EnglishTeacher,
    Nutritionist,
    /// Fallback for any label outside the two expert choices.
    General,
}

/// Personas offered in the select control, in display order. `General`
/// is intentionally absent: it only exists as the fallback branch.
pub const SELECTABLE: [Persona; 2] = [Persona::EnglishTeacher, Persona::Nutritionist];

impl Persona {
    /// Map a label to a persona. Anything outside the two known labels
    /// (including an empty string) maps to `General`; no error.
    pub fn from_label(label: &str) -> Persona {
        match label {
            "english-teacher" => Persona::EnglishTeacher,
            "nutritionist" => Persona::Nutritionist,
            _ => Persona::General,
        }
    }

    /// The fixed system instruction sent as the first message of every
    /// request made under this persona.
    pub fn instruction(self) -> &'static str {
        match self {
            Persona::EnglishTeacher => {
                "You are an excellent English teacher. \
                 Explain things clearly so that English learners can follow."
            }
            Persona::Nutritionist => {
                "You are a nutritionist with deep professional knowledge. \
                 Answer questions about health and diet carefully."
            }
            Persona::General => {
                "You are a helpful AI assistant. Answer questions politely."
            }
        }
    }

    /// Human-readable name shown in the select control.
    pub fn display_name(self) -> &'static str {
        match self {
            Persona::EnglishTeacher => "English teacher",
            Persona::Nutritionist => "Nutritionist",
            Persona::General => "General assistant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_their_personas() {
        assert_eq!(Persona::from_label("english-teacher"), Persona::EnglishTeacher);
        assert_eq!(Persona::from_label("nutritionist"), Persona::Nutritionist);
    }

    #[test]
    fn unknown_and_empty_labels_fall_back_to_general() {
        assert_eq!(Persona::from_label("astrologer"), Persona::General);
        assert_eq!(Persona::from_label(""), Persona::General);
        // Display names are not labels; they must not match either.
        assert_eq!(Persona::from_label("English teacher"), Persona::General);
    }

    #[test]
    fn each_persona_keeps_its_fixed_instruction() {
        assert!(Persona::EnglishTeacher.instruction().contains("English teacher"));
        assert!(Persona::Nutritionist.instruction().contains("nutritionist"));
        assert!(Persona::General.instruction().contains("AI assistant"));
    }

    #[test]
    fn selectable_personas_exclude_the_fallback() {
        assert_eq!(SELECTABLE.len(), 2);
        assert!(!SELECTABLE.contains(&Persona::General));
    }
}
