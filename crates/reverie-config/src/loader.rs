use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Missing API keys and out-of-range tuning values are fatal here,
    /// at startup, rather than surfacing per-request.
    ///
    /// # Errors
    ///
    /// Returns an error if no capability is configured or a configured
    /// section is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.asr.is_none() && self.chat.is_none() && self.tts.is_none() {
            anyhow::bail!("at least one capability must be configured (asr, chat, or tts)");
        }

        self.validate_asr()?;
        self.validate_chat()?;
        self.validate_tts()?;
        Ok(())
    }

    fn validate_asr(&self) -> anyhow::Result<()> {
        let Some(ref asr) = self.asr else {
            return Ok(());
        };

        require_api_key(asr.api_key.as_ref(), "asr")?;

        if asr.max_upload_mb == 0 || asr.max_upload_mb > 100 {
            anyhow::bail!("asr.max_upload_mb must be between 1 and 100");
        }

        if asr.allowed_formats.is_empty() {
            anyhow::bail!("asr.allowed_formats must not be empty");
        }

        Ok(())
    }

    fn validate_chat(&self) -> anyhow::Result<()> {
        let Some(ref chat) = self.chat else {
            return Ok(());
        };

        require_api_key(chat.api_key.as_ref(), "chat")?;

        if !(0.0..=2.0).contains(&chat.temperature) {
            anyhow::bail!("chat.temperature must be between 0.0 and 2.0");
        }

        if chat.max_tokens == 0 {
            anyhow::bail!("chat.max_tokens must be greater than 0");
        }

        if !(1..=20).contains(&chat.memory_size) {
            anyhow::bail!("chat.memory_size must be between 1 and 20");
        }

        Ok(())
    }

    fn validate_tts(&self) -> anyhow::Result<()> {
        let Some(ref tts) = self.tts else {
            return Ok(());
        };

        require_api_key(tts.api_key.as_ref(), "tts")?;

        if tts.max_text_chars == 0 {
            anyhow::bail!("tts.max_text_chars must be greater than 0");
        }

        Ok(())
    }
}

fn require_api_key(key: Option<&secrecy::SecretString>, section: &str) -> anyhow::Result<()> {
    match key {
        Some(key) if !key.expose_secret().is_empty() => Ok(()),
        _ => anyhow::bail!("{section}.api_key is required"),
    }
}

#[cfg(test)]
mod tests {
    use crate::Config;

    fn parse(input: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn minimal_chat_config() {
        let config = parse(
            r#"
            [chat]
            type = "openai"
            api_key = "sk-test"
            "#,
        )
        .unwrap();

        let chat = config.chat.unwrap();
        assert_eq!(chat.model, "gpt-4o-mini");
        assert!((chat.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(chat.max_tokens, 500);
        assert_eq!(chat.memory_size, 5);
    }

    #[test]
    fn empty_config_rejected() {
        let err = parse("").unwrap_err();
        assert!(err.to_string().contains("at least one capability"));
    }

    #[test]
    fn missing_api_key_rejected() {
        let err = parse(
            r#"
            [asr]
            type = "hf_inference"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("asr.api_key"));
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let err = parse(
            r#"
            [chat]
            type = "openai"
            api_key = "sk-test"
            temperature = 2.5
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn out_of_range_memory_size_rejected() {
        let err = parse(
            r#"
            [chat]
            type = "openai"
            api_key = "sk-test"
            memory_size = 0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("memory_size"));
    }

    #[test]
    fn asr_defaults() {
        let config = parse(
            r#"
            [asr]
            type = "hf_inference"
            api_key = "hf-test"
            "#,
        )
        .unwrap();

        let asr = config.asr.unwrap();
        assert_eq!(asr.model, "openai/whisper-large-v3");
        assert_eq!(asr.max_upload_bytes(), 25 * 1024 * 1024);
        assert_eq!(asr.allowed_formats.len(), 4);
    }

    #[test]
    fn tts_defaults() {
        let config = parse(
            r#"
            [tts]
            type = "hf_inference"
            api_key = "hf-test"
            "#,
        )
        .unwrap();

        let tts = config.tts.unwrap();
        assert_eq!(tts.max_text_chars, 2000);
        assert_eq!(tts.audio_dir, std::path::PathBuf::from("temp_audio"));
        assert_eq!(tts.max_age_seconds, 3600);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = parse(
            r#"
            [chat]
            type = "openai"
            api_key = "sk-test"
            retries = 3
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("retries"));
    }
}
