/// Prompt construction from UI selections
///
/// A caption type picks a table of three templates, the length selector
/// picks which of the three to use, and the chosen extra option sentences
/// are appended before placeholder substitution. This is a pure function
/// of the selections; the UI keeps the result in an editable panel.

pub mod templates;

use crate::error::CaptionError;
use std::fmt;
use std::str::FromStr;

pub use templates::{EXTRA_OPTIONS, NAME_OPTION, NAME_PLACEHOLDER};

/// A named captioning style with its own three prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionType {
    Descriptive,
    DescriptiveCasual,
    Straightforward,
    StableDiffusionPrompt,
    MidJourney,
    DanbooruTagList,
    E621TagList,
    Rule34TagList,
    BooruLikeTagList,
    ArtCritic,
    ProductListing,
    SocialMediaPost,
}

impl CaptionType {
    /// All caption types, in dropdown order
    pub const ALL: [CaptionType; 12] = [
        CaptionType::Descriptive,
        CaptionType::DescriptiveCasual,
        CaptionType::Straightforward,
        CaptionType::StableDiffusionPrompt,
        CaptionType::MidJourney,
        CaptionType::DanbooruTagList,
        CaptionType::E621TagList,
        CaptionType::Rule34TagList,
        CaptionType::BooruLikeTagList,
        CaptionType::ArtCritic,
        CaptionType::ProductListing,
        CaptionType::SocialMediaPost,
    ];

    /// The three template variants for this type:
    /// [unconstrained, word-count-bounded, qualitative-length]
    pub fn templates(self) -> [&'static str; 3] {
        match self {
            CaptionType::Descriptive => templates::DESCRIPTIVE,
            CaptionType::DescriptiveCasual => templates::DESCRIPTIVE_CASUAL,
            CaptionType::Straightforward => templates::STRAIGHTFORWARD,
            CaptionType::StableDiffusionPrompt => templates::STABLE_DIFFUSION,
            CaptionType::MidJourney => templates::MIDJOURNEY,
            CaptionType::DanbooruTagList => templates::DANBOORU,
            CaptionType::E621TagList => templates::E621,
            CaptionType::Rule34TagList => templates::RULE34,
            CaptionType::BooruLikeTagList => templates::BOORU_LIKE,
            CaptionType::ArtCritic => templates::ART_CRITIC,
            CaptionType::ProductListing => templates::PRODUCT_LISTING,
            CaptionType::SocialMediaPost => templates::SOCIAL_MEDIA,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CaptionType::Descriptive => "Descriptive",
            CaptionType::DescriptiveCasual => "Descriptive (Casual)",
            CaptionType::Straightforward => "Straightforward",
            CaptionType::StableDiffusionPrompt => "Stable Diffusion Prompt",
            CaptionType::MidJourney => "MidJourney",
            CaptionType::DanbooruTagList => "Danbooru tag list",
            CaptionType::E621TagList => "e621 tag list",
            CaptionType::Rule34TagList => "Rule34 tag list",
            CaptionType::BooruLikeTagList => "Booru-like tag list",
            CaptionType::ArtCritic => "Art Critic",
            CaptionType::ProductListing => "Product Listing",
            CaptionType::SocialMediaPost => "Social Media Post",
        }
    }
}

impl fmt::Display for CaptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CaptionType {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaptionType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| CaptionError::InvalidCaptionType(s.to_string()))
    }
}

/// Caption length selector: the "any" sentinel, a positive word count,
/// or one of five qualitative buckets. Determines which of the three
/// templates of a caption type is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionLength {
    Any,
    Words(u32),
    VeryShort,
    Short,
    MediumLength,
    Long,
    VeryLong,
}

impl CaptionLength {
    /// Dropdown choices: "any", the qualitative buckets, then word counts
    pub fn choices() -> Vec<CaptionLength> {
        let mut choices = vec![
            CaptionLength::Any,
            CaptionLength::VeryShort,
            CaptionLength::Short,
            CaptionLength::MediumLength,
            CaptionLength::Long,
            CaptionLength::VeryLong,
        ];
        choices.extend(
            templates::WORD_COUNTS
                .step_by(templates::WORD_COUNT_STEP as usize)
                .map(CaptionLength::Words),
        );
        choices
    }

    /// Index into a caption type's 3-element template table
    pub fn template_index(self) -> usize {
        match self {
            CaptionLength::Any => 0,
            CaptionLength::Words(_) => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for CaptionLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptionLength::Any => f.write_str("any"),
            CaptionLength::Words(n) => write!(f, "{}", n),
            CaptionLength::VeryShort => f.write_str("very short"),
            CaptionLength::Short => f.write_str("short"),
            CaptionLength::MediumLength => f.write_str("medium-length"),
            CaptionLength::Long => f.write_str("long"),
            CaptionLength::VeryLong => f.write_str("very long"),
        }
    }
}

impl FromStr for CaptionLength {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u32>() {
            if n == 0 {
                return Err(CaptionError::InvalidCaptionType(s.to_string()));
            }
            return Ok(CaptionLength::Words(n));
        }
        match s {
            "any" => Ok(CaptionLength::Any),
            "very short" => Ok(CaptionLength::VeryShort),
            "short" => Ok(CaptionLength::Short),
            "medium-length" => Ok(CaptionLength::MediumLength),
            "long" => Ok(CaptionLength::Long),
            "very long" => Ok(CaptionLength::VeryLong),
            _ => Err(CaptionError::InvalidCaptionType(s.to_string())),
        }
    }
}

/// Resolve extra-option toggles to the selected sentences, always in
/// declaration order of `EXTRA_OPTIONS` (never selection order).
pub fn selected_extras(toggles: &[bool]) -> Vec<&'static str> {
    EXTRA_OPTIONS
        .iter()
        .zip(toggles.iter())
        .filter(|(_, &on)| on)
        .map(|(&text, _)| text)
        .collect()
}

/// Build the instruction string for the given selections.
///
/// Selected extra option sentences are appended space-joined, then the
/// `{name}`, `{length}` and `{word_count}` placeholders are substituted
/// over the whole string, so placeholders inside extra options (the name
/// option) are substituted too. An empty name becomes the literal
/// `{NAME}` token.
pub fn build_prompt(
    caption_type: CaptionType,
    length: CaptionLength,
    extras: &[&str],
    name: &str,
) -> String {
    let mut prompt = caption_type.templates()[length.template_index()].to_string();

    if !extras.is_empty() {
        prompt.push(' ');
        prompt.push_str(&extras.join(" "));
    }

    let length_text = length.to_string();
    let name_text = if name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        name
    };

    prompt
        .replace("{name}", name_text)
        .replace("{length}", &length_text)
        .replace("{word_count}", &length_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptive_any_is_verbatim_template() {
        let prompt = build_prompt(CaptionType::Descriptive, CaptionLength::Any, &[], "");
        assert_eq!(prompt, "Write a detailed description for this image.");
    }

    #[test]
    fn test_word_count_substitution() {
        let prompt = build_prompt(
            CaptionType::Descriptive,
            CaptionLength::Words(30),
            &[],
            "Alice",
        );
        assert_eq!(
            prompt,
            "Write a detailed description for this image in 30 words or less."
        );
    }

    #[test]
    fn test_qualitative_length_substitution() {
        let prompt = build_prompt(
            CaptionType::Descriptive,
            CaptionLength::MediumLength,
            &[],
            "",
        );
        assert_eq!(
            prompt,
            "Write a medium-length detailed description for this image."
        );
    }

    #[test]
    fn test_all_types_and_length_modes_nonempty() {
        let lengths = [
            CaptionLength::Any,
            CaptionLength::Words(40),
            CaptionLength::Long,
        ];
        for caption_type in CaptionType::ALL {
            for length in lengths {
                let prompt = build_prompt(caption_type, length, &[], "");
                assert!(!prompt.is_empty(), "{caption_type} / {length}");
                assert!(!prompt.contains("{word_count}"));
                assert!(!prompt.contains("{length}"));
            }
        }
    }

    #[test]
    fn test_extras_appended_verbatim_in_declaration_order() {
        let extras = [EXTRA_OPTIONS[4], EXTRA_OPTIONS[2]];
        let prompt = build_prompt(CaptionType::MidJourney, CaptionLength::Any, &extras, "");
        for extra in extras {
            assert!(prompt.contains(extra));
        }

        // Toggles yield declaration order no matter how they were clicked
        let mut toggles = vec![false; EXTRA_OPTIONS.len()];
        toggles[4] = true;
        toggles[2] = true;
        let selected = selected_extras(&toggles);
        assert_eq!(selected, vec![EXTRA_OPTIONS[2], EXTRA_OPTIONS[4]]);

        let prompt = build_prompt(CaptionType::MidJourney, CaptionLength::Any, &selected, "");
        let pos_a = prompt.find(EXTRA_OPTIONS[2]).unwrap();
        let pos_b = prompt.find(EXTRA_OPTIONS[4]).unwrap();
        assert!(pos_a < pos_b);
    }

    #[test]
    fn test_name_option_substitution() {
        let extras = [NAME_OPTION];
        let with_name = build_prompt(CaptionType::Descriptive, CaptionLength::Any, &extras, "Alice");
        assert!(with_name.contains("refer to them as Alice."));

        let without_name = build_prompt(CaptionType::Descriptive, CaptionLength::Any, &extras, "");
        assert!(without_name.contains("refer to them as {NAME}."));
    }

    #[test]
    fn test_unknown_type_fails() {
        let parsed = "Sonnet".parse::<CaptionType>();
        assert_eq!(
            parsed,
            Err(CaptionError::InvalidCaptionType("Sonnet".to_string()))
        );
    }

    #[test]
    fn test_length_choices_round_trip() {
        for choice in CaptionLength::choices() {
            let parsed = choice.to_string().parse::<CaptionLength>().unwrap();
            assert_eq!(parsed, choice);
        }
    }

    #[test]
    fn test_template_index_selection() {
        assert_eq!(CaptionLength::Any.template_index(), 0);
        assert_eq!(CaptionLength::Words(120).template_index(), 1);
        assert_eq!(CaptionLength::VeryLong.template_index(), 2);
    }
}
