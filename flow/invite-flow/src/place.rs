//! Place selection: free text or one of the suggestion chips

/// Suggested places shown as chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacePreset {
    Park,
    Cinema,
    CoffeeShop,
    Embankment,
}

impl PlacePreset {
    pub const ALL: [Self; 4] = [Self::Park, Self::Cinema, Self::CoffeeShop, Self::Embankment];

    /// Chip label as shown to the user
    pub fn label(self) -> &'static str {
        match self {
            Self::Park => "Парк",
            Self::Cinema => "Кино",
            Self::CoffeeShop => "Кофейня",
            Self::Embankment => "Набережная",
        }
    }

    /// Short description shown under the chips once selected
    pub fn note(self) -> &'static str {
        match self {
            Self::Park => {
                "Свежий воздух и спокойствие. Можно прогуляться по аллеям, послушать птиц и сделать милые фото на лавочке."
            }
            Self::Cinema => {
                "Совместный фильм: отличный повод посмеяться и обсудить впечатления. Попкорн, уют и новые эмоции."
            }
            Self::CoffeeShop => {
                "Тёплая атмосфера, ароматный кофе и десерты. Можно спокойно пообщаться и насладиться уютом."
            }
            Self::Embankment => {
                "Вид на воду расслабляет. Приятный бриз и романтичная прогулка рядом с городскими огнями."
            }
        }
    }

    /// Match a chip by label or by its English name, ignoring case
    pub fn find(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|preset| {
            preset.label().to_lowercase() == name.to_lowercase()
                || format!("{preset:?}").eq_ignore_ascii_case(name)
        })
    }
}

/// Which chip is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipSelection {
    #[default]
    None,
    Preset(PlacePreset),
    /// "Другое": the user will type the place
    Other,
}

/// Free-text place field plus chips; the two are mutually exclusive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceInput {
    text: String,
    chip: ChipSelection,
}

impl PlaceInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight a chip; any chip clears the typed text
    pub fn choose(&mut self, chip: ChipSelection) {
        if chip != ChipSelection::None {
            self.text.clear();
        }
        self.chip = chip;
    }

    /// Replace the typed text; typing drops the chip selection
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.chip = ChipSelection::None;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chip(&self) -> ChipSelection {
        self.chip
    }

    /// Note for the selected preset, if any
    pub fn note(&self) -> Option<&'static str> {
        match self.chip {
            ChipSelection::Preset(preset) => Some(preset.note()),
            ChipSelection::None | ChipSelection::Other => None,
        }
    }

    /// The place to send, or `None` when nothing usable was chosen
    pub fn resolve(&self) -> Option<String> {
        let typed = self.text.trim();
        if !typed.is_empty() {
            return Some(typed.to_string());
        }
        match self.chip {
            ChipSelection::Preset(preset) => Some(preset.label().to_string()),
            ChipSelection::None | ChipSelection::Other => None,
        }
    }
}
