/// One severity classification, covering a contiguous score range.
///
/// The advisory, color, thumbnail and footer only affect presentation,
/// never control flow.
#[derive(Debug, PartialEq, Eq)]
pub struct ResultTier {
    pub min: u32,
    /// Inclusive. `None` means unbounded above (the last tier).
    pub max: Option<u32>,
    pub label: &'static str,
    pub advisory: &'static str,
    pub color: u32,
    pub thumbnail: &'static str,
    pub footer: &'static str,
}

impl ResultTier {
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min && self.max.is_none_or(|max| score <= max)
    }
}

const DOCTOR_FOOTER: &str = "⚠ Consult your doctor if your symptoms worsen.";
const ER_FOOTER: &str = "⚠ Visit the ER if you are considering self-harm or worse.";

/// Severity tiers in ascending order. Ranges are contiguous and
/// non-overlapping, so every score lands in exactly one tier.
pub static TIERS: [ResultTier; 6] = [
    ResultTier {
        min: 0,
        max: Some(10),
        label: "Normal",
        advisory: "Your responses suggest **normal** levels of stress. Ups and downs happen in \
                   life and shape who we are for the better. Keep going strong!",
        color: 0x00FF00,
        thumbnail: "https://raw.githubusercontent.com/purge-dev/clinicare/main/assets/normal.png",
        footer: DOCTOR_FOOTER,
    },
    ResultTier {
        min: 11,
        max: Some(16),
        label: "Mild",
        advisory: "Your responses suggest **mild** levels of mood disturbance.",
        color: 0xFFFF00,
        thumbnail: "https://raw.githubusercontent.com/purge-dev/clinicare/main/assets/moody.png",
        footer: DOCTOR_FOOTER,
    },
    ResultTier {
        min: 17,
        max: Some(20),
        label: "Borderline",
        advisory: "Your responses suggest **borderline clinical depression**. Consider making an \
                   appointment with your doctor to discuss ways going forward.",
        color: 0xFFA500,
        thumbnail: "https://raw.githubusercontent.com/purge-dev/clinicare/main/assets/moody.png",
        footer: DOCTOR_FOOTER,
    },
    ResultTier {
        min: 21,
        max: Some(30),
        label: "Moderate",
        advisory: "Your responses suggest **moderate clinical depression**. Consult a mental \
                   health professional soon to discuss ways going forward.",
        color: 0xFF8C00,
        thumbnail: "https://raw.githubusercontent.com/purge-dev/clinicare/main/assets/borderline.png",
        footer: DOCTOR_FOOTER,
    },
    ResultTier {
        min: 31,
        max: Some(40),
        label: "Severe",
        advisory: "Your responses suggest **severe clinical depression**. Consult a doctor or \
                   mental health professional soon to discuss ways going forward.",
        color: 0xFF0000,
        thumbnail: "https://raw.githubusercontent.com/purge-dev/clinicare/main/assets/severe.png",
        footer: ER_FOOTER,
    },
    ResultTier {
        min: 41,
        max: None,
        label: "Extreme",
        advisory: "Your responses suggest **extreme clinical depression**. Please visit an urgent \
                   care mental health clinic as this is likely impacting your overall health.",
        color: 0x8B0000,
        thumbnail: "https://raw.githubusercontent.com/purge-dev/clinicare/main/assets/severe.png",
        footer: ER_FOOTER,
    },
];

/// Map a final score to its severity tier. Total over all scores.
pub fn classify(score: u32) -> &'static ResultTier {
    TIERS
        .iter()
        .find(|tier| tier.contains(score))
        .expect("tier ranges partition all scores")
}
