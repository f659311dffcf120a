#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::commands::mock::MockInteraction;
    use crate::commands::{
        CommandContext, CommandDescriptor, CommandRegistry, DispatchOutcome, Interaction,
        SlashCommand, COMMAND_ERROR_REPLY,
    };
    use crate::fs::MemFs;
    use crate::logging::LogSink;
    use crate::store::ConfigStore;

    struct Failing {
        reply_first: bool,
    }

    #[async_trait]
    impl SlashCommand for Failing {
        fn descriptor(&self) -> CommandDescriptor {
            CommandDescriptor {
                name: "boom",
                description: "always fails",
                options: Vec::new(),
                admin_only: false,
            }
        }

        async fn execute(
            &self,
            interaction: &mut dyn Interaction,
            _ctx: &CommandContext<'_>,
        ) -> Result<()> {
            if self.reply_first {
                interaction.reply("working on it").await?;
            }
            bail!("exploded")
        }
    }

    struct Echo(&'static str);

    #[async_trait]
    impl SlashCommand for Echo {
        fn descriptor(&self) -> CommandDescriptor {
            CommandDescriptor {
                name: "echo",
                description: "replies with a fixed text",
                options: Vec::new(),
                admin_only: false,
            }
        }

        async fn execute(
            &self,
            interaction: &mut dyn Interaction,
            _ctx: &CommandContext<'_>,
        ) -> Result<()> {
            interaction.reply(self.0).await
        }
    }

    fn fixtures() -> (Mutex<ConfigStore<MemFs>>, LogSink<MemFs>) {
        let fs = MemFs::new();
        fs.insert("/config.json", r#"{"enabledChannels": []}"#);
        let store = Mutex::new(ConfigStore::load(fs, "/config.json").unwrap());
        let sink = LogSink::new(MemFs::new(), "/bot.log", winloss_types::LogLevel::Info);
        (store, sink)
    }

    #[tokio::test]
    async fn test_unknown_command_sends_nothing() {
        let (channels, logs) = fixtures();
        let ctx = CommandContext { channels: &channels, logs: &logs };
        let registry = CommandRegistry::with_defaults();
        let mut interaction = MockInteraction::new("nope", 1);

        let outcome = registry.dispatch(&mut interaction, &ctx).await;

        assert_eq!(outcome, DispatchOutcome::Unknown);
        assert_eq!(interaction.sent(), 0);
    }

    #[tokio::test]
    async fn test_success() {
        let (channels, logs) = fixtures();
        let ctx = CommandContext { channels: &channels, logs: &logs };
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(Echo("hi")));
        let mut interaction = MockInteraction::new("echo", 1);

        let outcome = registry.dispatch(&mut interaction, &ctx).await;

        assert_eq!(outcome, DispatchOutcome::Completed);
        assert_eq!(interaction.replies, vec!["hi"]);
    }

    #[tokio::test]
    async fn test_failure_replies_once_with_generic_error() {
        let (channels, logs) = fixtures();
        let ctx = CommandContext { channels: &channels, logs: &logs };
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(Failing { reply_first: false }));
        let mut interaction = MockInteraction::new("boom", 1);

        let outcome = registry.dispatch(&mut interaction, &ctx).await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(interaction.replies, vec![COMMAND_ERROR_REPLY]);
        assert!(interaction.follow_ups.is_empty());
    }

    #[tokio::test]
    async fn test_failure_after_reply_uses_follow_up() {
        let (channels, logs) = fixtures();
        let ctx = CommandContext { channels: &channels, logs: &logs };
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(Failing { reply_first: true }));
        let mut interaction = MockInteraction::new("boom", 1);

        registry.dispatch(&mut interaction, &ctx).await;

        assert_eq!(interaction.replies, vec!["working on it"]);
        assert_eq!(interaction.follow_ups, vec![COMMAND_ERROR_REPLY]);
    }

    #[tokio::test]
    async fn test_failed_error_reply_is_swallowed() {
        let (channels, logs) = fixtures();
        let ctx = CommandContext { channels: &channels, logs: &logs };
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(Failing { reply_first: false }));
        let mut interaction = MockInteraction::new("boom", 1).failing_sends();

        let outcome = registry.dispatch(&mut interaction, &ctx).await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(interaction.sent(), 0);
    }

    #[test]
    fn test_defaults_registered() {
        let registry = CommandRegistry::with_defaults();
        assert_eq!(registry.len(), 6);
        let names: Vec<_> = registry.descriptors().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["channels", "clearlogs", "disable", "enable", "logs", "status"]
        );
    }

    #[test]
    fn test_only_status_is_public() {
        let registry = CommandRegistry::with_defaults();
        let public: Vec<_> = registry
            .descriptors()
            .into_iter()
            .filter(|d| !d.admin_only)
            .map(|d| d.name)
            .collect();
        assert_eq!(public, vec!["status"]);
    }

    #[tokio::test]
    async fn test_duplicate_registration_keeps_latest() {
        let (channels, logs) = fixtures();
        let ctx = CommandContext { channels: &channels, logs: &logs };
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(Echo("first")));
        registry.register(Box::new(Echo("second")));
        assert_eq!(registry.len(), 1);

        let mut interaction = MockInteraction::new("echo", 1);
        registry.dispatch(&mut interaction, &ctx).await;

        assert_eq!(interaction.replies, vec!["second"]);
    }
}
