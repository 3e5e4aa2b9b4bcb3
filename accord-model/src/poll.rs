//! Polls attached to messages.
//!
//! A poll lives inside its message; answers are addressed by
//! `(message id, answer id)`. Vote events mutate the answer in place rather
//! than re-patching the message.

use crate::{FieldMerge, MergePolicy, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A custom or unicode emoji reference, as carried by poll answers and buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartialEmoji {
    #[serde(default)]
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

/// One answer of a poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub id: u32,
    pub text: Option<String>,
    pub emoji: Option<PartialEmoji>,
    pub vote_count: u64,
}

impl PollAnswer {
    /// Applies a result count; a missing count leaves the tally alone.
    pub fn apply_count(&mut self, count: Option<u64>) {
        if let Some(count) = count {
            self.vote_count = count;
        }
    }

    /// Records one more vote.
    pub fn add_vote(&mut self) {
        self.vote_count = self.vote_count.saturating_add(1);
    }

    /// Withdraws one vote. Never drops below zero.
    pub fn remove_vote(&mut self) {
        self.vote_count = self.vote_count.saturating_sub(1);
    }

    /// The emoji, if it names anything.
    #[must_use]
    pub fn emoji(&self) -> Option<&PartialEmoji> {
        self.emoji
            .as_ref()
            .filter(|emoji| emoji.id.is_some() || emoji.name.is_some())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPollMedia {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    emoji: Option<PartialEmoji>,
}

#[derive(Debug, Deserialize)]
struct RawPollAnswer {
    answer_id: u32,
    #[serde(default)]
    poll_media: RawPollMedia,
    #[serde(default)]
    count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawAnswerCount {
    id: u32,
    #[serde(default)]
    count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawPollResults {
    #[serde(default)]
    is_finalized: bool,
    #[serde(default)]
    answer_counts: Vec<RawAnswerCount>,
}

/// A poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub question: Option<String>,
    pub answers: Vec<PollAnswer>,
    pub expires_at: Option<Timestamp>,
    pub allow_multiselect: bool,
    pub layout_type: u8,
    pub results_finalized: bool,
}

impl Poll {
    /// Builds a poll from its raw payload.
    pub fn from_raw(raw: &Value) -> ModelResult<Self> {
        let mut poll = Self {
            question: None,
            answers: Vec::new(),
            expires_at: None,
            allow_multiselect: false,
            layout_type: 1,
            results_finalized: false,
        };
        poll.patch(raw)?;
        Ok(poll)
    }

    /// Applies a raw poll payload. Existing answers keep their tallies unless
    /// the payload carries results for them.
    pub fn patch(&mut self, raw: &Value) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, MergePolicy::Partial, "poll")?;

        if let Some(question) = fields.raw("question") {
            self.question = question
                .get("text")
                .and_then(Value::as_str)
                .map(str::to_string);
        }
        fields.merge("expiry", &mut self.expires_at)?;
        fields.merge("allow_multiselect", &mut self.allow_multiselect)?;
        fields.merge_or("layout_type", &mut self.layout_type, 1)?;

        if let Some(raw_answers) = fields.get::<Vec<RawPollAnswer>>("answers")? {
            let mut previous = std::mem::take(&mut self.answers);
            for raw_answer in raw_answers {
                let mut answer = match previous.iter().position(|a| a.id == raw_answer.answer_id) {
                    Some(index) => previous.swap_remove(index),
                    None => PollAnswer {
                        id: raw_answer.answer_id,
                        text: raw_answer.poll_media.text,
                        emoji: raw_answer.poll_media.emoji,
                        vote_count: 0,
                    },
                };
                answer.apply_count(raw_answer.count);
                self.answers.push(answer);
            }
        }

        if let Some(results) = fields.get::<RawPollResults>("results")? {
            self.results_finalized = results.is_finalized;
            for result in results.answer_counts {
                if let Some(answer) = self.answer_mut(result.id) {
                    answer.apply_count(result.count);
                }
            }
        }
        Ok(())
    }

    /// Finds an answer by id.
    #[must_use]
    pub fn answer(&self, id: u32) -> Option<&PollAnswer> {
        self.answers.iter().find(|answer| answer.id == id)
    }

    /// Finds an answer by id for in-place mutation.
    pub fn answer_mut(&mut self, id: u32) -> Option<&mut PollAnswer> {
        self.answers.iter_mut().find(|answer| answer.id == id)
    }

    /// Sum of all answer tallies.
    #[must_use]
    pub fn total_votes(&self) -> u64 {
        self.answers.iter().map(|answer| answer.vote_count).sum()
    }
}
