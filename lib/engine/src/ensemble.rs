//! Ensemble voting
//!
//! Strategies run as independent tokio tasks. [`settle_all`] waits for every
//! task, keeping input order and turning an aborted or panicked task into an
//! error value; [`aggregate`] then votes over whatever succeeded.

use crate::error::{RecognitionError, StrategyError};
use crate::output::{DebugInfo, Identification, RecognitionMethod, VoteTally};
use ahash::AHashMap;
use futures_util::future::join_all;
use heritage_core::MonumentId;
use tokio::task::JoinHandle;
use tracing::warn;

/// Await every task, in order, without short-circuiting
pub async fn settle_all<T>(tasks: Vec<(String, JoinHandle<Result<T, StrategyError>>)>) -> Vec<Result<T, StrategyError>> {
    let (names, handles): (Vec<String>, Vec<_>) = tasks.into_iter().unzip();

    join_all(handles)
        .await
        .into_iter()
        .zip(names)
        .map(|(joined, strategy)| match joined {
            Ok(result) => result,
            Err(e) => Err(StrategyError::Failed {
                strategy,
                reason: e.to_string(),
            }),
        })
        .collect()
}

struct Ballot {
    first: Identification,
    votes: usize,
    confidence_sum: f32,
}

impl Ballot {
    fn mean_confidence(&self) -> f32 {
        self.confidence_sum / self.votes as f32
    }
}

/// Majority vote over strategy results
///
/// Most votes wins; ties go to the higher mean confidence, then to the
/// monument seen first. The returned identification carries the mean
/// confidence and the full tally.
pub fn aggregate(results: Vec<Result<Identification, StrategyError>>) -> Result<Identification, RecognitionError> {
    let mut ballots: Vec<Ballot> = Vec::new();
    let mut index: AHashMap<MonumentId, usize> = AHashMap::new();
    let mut failures = Vec::new();

    for result in results {
        match result {
            Ok(identification) => match index.get(&identification.monument_id).copied() {
                Some(i) => {
                    ballots[i].votes += 1;
                    ballots[i].confidence_sum += identification.confidence;
                }
                None => {
                    index.insert(identification.monument_id.clone(), ballots.len());
                    ballots.push(Ballot {
                        confidence_sum: identification.confidence,
                        votes: 1,
                        first: identification,
                    });
                }
            },
            Err(e) => {
                warn!(strategy = e.strategy(), error = %e, "strategy produced no identification");
                failures.push(e);
            }
        }
    }

    let mut winner: Option<&Ballot> = None;
    for ballot in &ballots {
        let better = match winner {
            None => true,
            Some(best) => {
                ballot.votes > best.votes
                    || (ballot.votes == best.votes && ballot.mean_confidence() > best.mean_confidence())
            }
        };
        if better {
            winner = Some(ballot);
        }
    }

    let Some(winner) = winner else {
        return Err(RecognitionError::NoConsensus { failures });
    };

    let votes = ballots
        .iter()
        .map(|b| VoteTally {
            monument_id: b.first.monument_id.clone(),
            monument_name: b.first.monument_name.clone(),
            votes: b.votes,
            mean_confidence: b.mean_confidence(),
        })
        .collect();

    let source = &winner.first.debug_info;
    Ok(Identification {
        monument_id: winner.first.monument_id.clone(),
        monument_name: winner.first.monument_name.clone(),
        confidence: winner.mean_confidence(),
        debug_info: DebugInfo {
            raw_score: source.raw_score,
            breakdown: source.breakdown,
            top_candidates: source.top_candidates.clone(),
            distinguishing_factor: source.distinguishing_factor.clone(),
            votes,
            ..DebugInfo::new(RecognitionMethod::Ensemble)
        },
    })
}
