use std::fmt;

/// Tone preset used to flavour the generated copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    #[default]
    Hype,    // 🔥 熱血叫賣風
    Bestie,  // 💖 溫柔閨蜜風
    Expert,  // 🧐 專業分析風
    Comedic, // 🤣 幽默搞笑風
}

impl Style {
    /// All presets in menu order.
    pub const ALL: [Style; 4] = [Style::Hype, Style::Bestie, Style::Expert, Style::Comedic];

    /// Label shown to the user and stored in the history file.
    pub fn label(&self) -> &'static str {
        match self {
            Style::Hype => "🔥 熱血叫賣風",
            Style::Bestie => "💖 溫柔閨蜜風",
            Style::Expert => "🧐 專業分析風",
            Style::Comedic => "🤣 幽默搞笑風",
        }
    }

    /// Short ASCII alias accepted on the command line.
    pub fn alias(&self) -> &'static str {
        match self {
            Style::Hype => "hype",
            Style::Bestie => "bestie",
            Style::Expert => "pro",
            Style::Comedic => "funny",
        }
    }

    /// Label without the leading emoji.
    pub fn name(&self) -> &'static str {
        let label = self.label();
        label.split_once(' ').map(|(_, n)| n).unwrap_or(label)
    }

    /// 1-based menu position.
    pub fn number(&self) -> usize {
        Style::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }

    /// Convert stored label → enum
    pub fn from_label(s: &str) -> Option<Self> {
        Style::ALL.into_iter().find(|st| st.label() == s)
    }

    /// Helper: resolve user input (number, label, bare name or alias)
    pub fn from_input(input: &str) -> Option<Self> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Style::ALL.get(i).copied());
        }

        let lower = s.to_lowercase();
        Style::ALL
            .into_iter()
            .find(|st| st.label() == s || st.name() == s || st.alias() == lower)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
