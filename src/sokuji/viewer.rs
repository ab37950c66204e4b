use std::collections::BTreeSet;
use std::{env, sync::OnceLock};

use backon::Retryable;
use poise::serenity_prelude::futures::{stream::FuturesUnordered, StreamExt};
use serde::Serialize;
use tracing::warn;

use crate::retry_strategies::viewer_retry_strategy;

use super::mogi::Mogi;

/// Standings payload consumed by each subscriber's stream overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerPayload {
    pub teams: [String; 2],
    pub left: usize,
    pub win: bool,
    pub dif: String,
    pub scores: [i32; 2],
}

impl ViewerPayload {
    pub fn of(mogi: &Mogi) -> Self {
        let scores = mogi.total();
        Self {
            teams: mogi.tags.clone(),
            left: mogi.left(),
            win: mogi.winning(),
            dif: format!("{:+}", scores[0] - scores[1]),
            scores,
        }
    }
}

fn client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

fn endpoint() -> Option<&'static str> {
    static ENDPOINT: OnceLock<Option<String>> = OnceLock::new();
    ENDPOINT
        .get_or_init(|| env::var("SOKUJI_VIEWER_URL").ok())
        .as_deref()
}

/// Delivers `payload` to every subscriber's overlay endpoint. Best effort:
/// failures are logged and never surface to the command.
pub async fn push(payload: &ViewerPayload, users: &BTreeSet<String>) {
    let Some(base) = endpoint() else { return };
    users
        .iter()
        .map(|user| async move {
            let deliver = || async {
                client()
                    .put(format!("{base}/{user}"))
                    .json(payload)
                    .send()
                    .await?
                    .error_for_status()?;
                Ok::<_, reqwest::Error>(())
            };
            if let Err(err) = deliver.retry(viewer_retry_strategy()).await {
                warn!("score push to {user} failed: {err}");
            }
        })
        .collect::<FuturesUnordered<_>>()
        .collect::<Vec<()>>()
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sokuji::Lang;

    #[test]
    fn payload_projects_the_win_flag() {
        let mut mogi = Mogi::new([String::from("AB"), String::from("XY")], Lang::En);
        for _ in 0..11 {
            mogi.add_race("123456", None, None).unwrap();
        }
        let payload = ViewerPayload::of(&mogi);
        assert_eq!(payload.left, 1);
        assert!(payload.win);
        assert_eq!(payload.dif, "+440");
        assert_eq!(payload.scores, [671, 231]);
    }

    #[test]
    fn payload_serializes_the_signed_differential() {
        let mut mogi = Mogi::new([String::from("A"), String::from("B")], Lang::En);
        mogi.penalty[1] = -15;
        let payload = ViewerPayload::of(&mogi);
        assert_eq!(payload.dif, "+15");
        assert!(!payload.win);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["dif"], "+15");
        assert_eq!(json["win"], false);
        assert_eq!(json["left"], 12);
    }
}
