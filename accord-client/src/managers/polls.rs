use super::CachedManager;
use crate::client::Client;
use crate::error::ClientResult;
use crate::transport::RestRequest;
use accord_cache::Collection;
use accord_model::User;
use accord_types::Snowflake;
use serde_json::Value;

/// Paging for [`MessageExt::fetch_poll_voters`](super::MessageExt::fetch_poll_voters).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPollVoters {
    /// Only voters with a user id after this one.
    pub after: Option<Snowflake>,
    pub limit: Option<u32>,
}

/// Lists the users who voted for one answer. Voters are not cached; users
/// already in the cache are patched.
pub(crate) async fn fetch_voters(
    client: &Client,
    channel_id: Snowflake,
    message_id: Snowflake,
    answer_id: u32,
    options: FetchPollVoters,
) -> ClientResult<Collection<User>> {
    let request = RestRequest::get(format!(
        "/channels/{channel_id}/polls/{message_id}/answers/{answer_id}"
    ))
    .query_opt("after", options.after)
    .query_opt("limit", options.limit);

    let raw = client.transport().request(request).await?;
    let users = CachedManager::new(client, &client.cache().users);
    let items: Vec<Value> = match raw.get("users") {
        Some(list) => serde_json::from_value(list.clone())?,
        None => Vec::new(),
    };
    items.iter().map(|item| users.add(item, false)).collect()
}
