use crate::io::DocumentFormat;

/// Presentation and export settings shared by a configurator and its views.
#[derive(Debug, Clone, PartialEq)]
pub struct FormOptions {
    pub export_format: DocumentFormat,
    pub pretty: bool,
    pub item_label: String,
    pub key_label: String,
    pub value_label: String,
    pub help_width: u16,
    pub number_step: f64,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            export_format: DocumentFormat::Json,
            pretty: true,
            item_label: "Item".to_string(),
            key_label: "Key:".to_string(),
            value_label: "Value:".to_string(),
            help_width: 60,
            number_step: 1.0,
        }
    }
}

impl FormOptions {
    pub fn with_export_format(mut self, format: DocumentFormat) -> Self {
        self.export_format = format;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_item_label(mut self, label: impl Into<String>) -> Self {
        self.item_label = label.into();
        self
    }

    pub fn with_key_value_labels(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_label = key.into();
        self.value_label = value.into();
        self
    }

    /// Column at which help text wraps; never below 10.
    pub fn with_help_width(mut self, width: u16) -> Self {
        self.help_width = width.max(10);
        self
    }

    pub fn with_number_step(mut self, step: f64) -> Self {
        if step.is_finite() && step != 0.0 {
            self.number_step = step;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_ignores_degenerate_values() {
        let options = FormOptions::default()
            .with_help_width(2)
            .with_number_step(f64::NAN)
            .with_item_label("Rule");
        assert_eq!(options.help_width, 10);
        assert_eq!(options.number_step, 1.0);
        assert_eq!(options.item_label, "Rule");
    }
}
