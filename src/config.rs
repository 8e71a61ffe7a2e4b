use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    #[default]
    None,
    Nfc,
    Nfkc,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Language tags whose blocks may hold REPL transcripts.
    #[serde(default = "default_transcript_langs")]
    pub transcript_langs: Vec<String>,

    #[serde(default = "default_primary_prompt")]
    pub primary_prompt: String,

    #[serde(default = "default_secondary_prompt")]
    pub secondary_prompt: String,

    #[serde(default = "default_toc_heading")]
    pub toc_heading: String,

    #[serde(default)]
    pub require_toc: bool,

    #[serde(default)]
    pub normalization: Normalization,
}

fn default_transcript_langs() -> Vec<String> {
    vec!["iex".to_string(), "elixir".to_string()]
}
fn default_primary_prompt() -> String {
    r"iex(\(\d+\))?>".to_string()
}
fn default_secondary_prompt() -> String {
    r"\.\.\.(\(\d+\))?>".to_string()
}
fn default_toc_heading() -> String {
    "Table of Contents".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            transcript_langs: default_transcript_langs(),
            primary_prompt: default_primary_prompt(),
            secondary_prompt: default_secondary_prompt(),
            toc_heading: default_toc_heading(),
            require_toc: false,
            normalization: Normalization::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.transcript_langs, vec!["iex", "elixir"]);
        assert_eq!(config.toc_heading, "Table of Contents");
        assert!(!config.require_toc);
        assert_eq!(config.normalization, Normalization::None);
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "transcript_langs": ["console"],
            "primary_prompt": "\\$",
            "secondary_prompt": ">",
            "toc_heading": "Contents",
            "require_toc": true,
            "normalization": "nfc"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.transcript_langs, vec!["console"]);
        assert_eq!(config.primary_prompt, "\\$");
        assert_eq!(config.secondary_prompt, ">");
        assert_eq!(config.toc_heading, "Contents");
        assert!(config.require_toc);
        assert_eq!(config.normalization, Normalization::Nfc);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: Config = serde_json::from_str(r#"{"require_toc": true}"#).unwrap();
        assert!(config.require_toc);
        assert_eq!(config.primary_prompt, default_primary_prompt());
        assert_eq!(config.transcript_langs, vec!["iex", "elixir"]);
    }

    #[test]
    fn test_normalization_variants() {
        let none: Config = serde_json::from_str(r#"{"normalization": "none"}"#).unwrap();
        assert_eq!(none.normalization, Normalization::None);

        let nfkc: Config = serde_json::from_str(r#"{"normalization": "nfkc"}"#).unwrap();
        assert_eq!(nfkc.normalization, Normalization::Nfkc);
    }
}
