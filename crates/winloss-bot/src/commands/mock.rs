//! Recording [`Interaction`] for command tests.

use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::Interaction;

pub struct MockInteraction {
    name: String,
    channel_id: u64,
    channel_options: HashMap<String, u64>,
    integer_options: HashMap<String, i64>,
    replied: bool,
    fail_sends: bool,
    pub replies: Vec<String>,
    pub follow_ups: Vec<String>,
}

impl MockInteraction {
    pub fn new(name: &str, channel_id: u64) -> Self {
        Self {
            name: name.to_string(),
            channel_id,
            channel_options: HashMap::new(),
            integer_options: HashMap::new(),
            replied: false,
            fail_sends: false,
            replies: Vec::new(),
            follow_ups: Vec::new(),
        }
    }

    pub fn with_channel(mut self, name: &str, id: u64) -> Self {
        self.channel_options.insert(name.to_string(), id);
        self
    }

    pub fn with_integer(mut self, name: &str, value: i64) -> Self {
        self.integer_options.insert(name.to_string(), value);
        self
    }

    /// Make reply and follow-up fail, as if Discord rejected them.
    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Total messages delivered (replies plus follow-ups).
    pub fn sent(&self) -> usize {
        self.replies.len() + self.follow_ups.len()
    }

    pub fn last_reply(&self) -> &str {
        self.replies.last().map(String::as_str).unwrap_or_default()
    }
}

#[async_trait]
impl Interaction for MockInteraction {
    fn command_name(&self) -> &str {
        &self.name
    }

    fn channel_id(&self) -> u64 {
        self.channel_id
    }

    fn channel_option(&self, name: &str) -> Option<u64> {
        self.channel_options.get(name).copied()
    }

    fn integer_option(&self, name: &str) -> Option<i64> {
        self.integer_options.get(name).copied()
    }

    fn has_replied(&self) -> bool {
        self.replied
    }

    async fn reply(&mut self, content: &str) -> Result<()> {
        if self.fail_sends {
            bail!("interaction reply rejected");
        }
        if self.replied {
            bail!("interaction already acknowledged");
        }
        self.replied = true;
        self.replies.push(content.to_string());
        Ok(())
    }

    async fn follow_up(&mut self, content: &str) -> Result<()> {
        if self.fail_sends {
            bail!("interaction follow-up rejected");
        }
        self.follow_ups.push(content.to_string());
        Ok(())
    }
}
