//! The bounded reasoning/executing loop behind every engine-backed command.
//!
//! `Start -> Reasoning -> (Executing -> Reasoning)* -> Done`. Requests in one
//! assistant message run sequentially in the order given, each seeing the effects
//! of the ones before it.

use super::engine::ReasoningEngine;
use super::types::{ConversationState, Decision, Message, OperationRequest};
use crate::config::AgentConfig;
use crate::tools::{OperationResult, ToolRegistry};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The engine produced a final answer
    Completed,
    /// The engine call failed or timed out
    EngineFailure(String),
    /// The engine kept requesting operations after the round-trip cap
    LoopBudgetExceeded,
}

/// A request together with the result it produced
#[derive(Debug, Clone)]
pub struct ExecutedOperation {
    pub request: OperationRequest,
    pub result: OperationResult,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub answer: String,
    pub stop: StopReason,
    pub transcript: ConversationState,
    pub operations: Vec<ExecutedOperation>,
    pub reasoning_calls: usize,
    pub round_trips: usize,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        self.stop == StopReason::Completed
    }
}

enum Phase {
    Reasoning,
    Executing(Vec<OperationRequest>),
    Done { answer: String, stop: StopReason },
}

pub struct AgentLoop {
    engine: Box<dyn ReasoningEngine>,
    registry: ToolRegistry,
    max_round_trips: usize,
    request_timeout: Duration,
}

impl AgentLoop {
    pub fn new(
        engine: Box<dyn ReasoningEngine>,
        registry: ToolRegistry,
        max_round_trips: usize,
        request_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            registry,
            max_round_trips,
            request_timeout,
        }
    }

    pub fn from_config(
        engine: Box<dyn ReasoningEngine>,
        registry: ToolRegistry,
        config: &AgentConfig,
    ) -> Self {
        Self::new(
            engine,
            registry,
            config.max_round_trips,
            config.request_timeout,
        )
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Process one user utterance in a fresh conversation
    pub async fn run(&self, system_prompt: &str, user_text: &str) -> RunOutcome {
        let mut state = ConversationState::new();
        state.seed_system(system_prompt);
        state.push_user(user_text);
        self.run_conversation(state).await
    }

    /// Continue `state`, whose last message should be the user's
    pub async fn run_conversation(&self, mut state: ConversationState) -> RunOutcome {
        let declarations = self.registry.declarations();
        let mut operations = Vec::new();
        let mut reasoning_calls = 0usize;
        let mut round_trips = 0usize;
        let mut phase = Phase::Reasoning;

        loop {
            phase = match phase {
                Phase::Reasoning => {
                    reasoning_calls += 1;
                    debug!(call = reasoning_calls, messages = state.len(), "reasoning");

                    let decision = tokio::time::timeout(
                        self.request_timeout,
                        self.engine.reason(&state, &declarations),
                    )
                    .await;

                    match decision {
                        Err(_) => engine_failure(format!(
                            "no response within {} seconds",
                            self.request_timeout.as_secs_f32()
                        )),
                        Ok(Err(err)) => engine_failure(err.to_string()),
                        Ok(Ok(Decision::FinalAnswer(text))) => {
                            state.push(Message::Assistant {
                                text: text.clone(),
                                requests: Vec::new(),
                            });
                            Phase::Done {
                                answer: text,
                                stop: StopReason::Completed,
                            }
                        }
                        Ok(Ok(Decision::Requests { text, requests })) if requests.is_empty() => {
                            state.push(Message::Assistant {
                                text: text.clone(),
                                requests,
                            });
                            Phase::Done {
                                answer: text,
                                stop: StopReason::Completed,
                            }
                        }
                        Ok(Ok(Decision::Requests { text, requests })) => {
                            if let Some(id) = duplicate_id(&requests) {
                                engine_failure(format!("duplicate operation request id '{id}'"))
                            } else if round_trips >= self.max_round_trips {
                                warn!(
                                    max_round_trips = self.max_round_trips,
                                    pending = requests.len(),
                                    "round-trip limit reached; not executing further requests"
                                );
                                Phase::Done {
                                    answer: format!(
                                        "I could not complete the request: the limit of {} operation round-trips was reached before a final answer. Completed operations are kept; ask again to continue.",
                                        self.max_round_trips
                                    ),
                                    stop: StopReason::LoopBudgetExceeded,
                                }
                            } else {
                                state.push(Message::Assistant {
                                    text,
                                    requests: requests.clone(),
                                });
                                Phase::Executing(requests)
                            }
                        }
                    }
                }
                Phase::Executing(requests) => {
                    round_trips += 1;
                    info!(
                        round_trip = round_trips,
                        requests = requests.len(),
                        "executing operation requests"
                    );

                    for request in requests {
                        let result = self
                            .registry
                            .execute_tool(&request.name, request.arguments.clone())
                            .await;
                        let text = self.registry.format_result(&request.name, &result);
                        debug!(
                            tool = %request.name,
                            id = %request.id,
                            success = result.success,
                            "operation finished"
                        );
                        state.push(Message::OperationResult {
                            request_id: request.id.clone(),
                            text,
                        });
                        operations.push(ExecutedOperation { request, result });
                    }
                    Phase::Reasoning
                }
                Phase::Done { answer, stop } => {
                    info!(
                        ?stop,
                        reasoning_calls,
                        round_trips,
                        operations = operations.len(),
                        "run finished"
                    );
                    return RunOutcome {
                        answer,
                        stop,
                        transcript: state,
                        operations,
                        reasoning_calls,
                        round_trips,
                    };
                }
            };
        }
    }
}

fn engine_failure(reason: String) -> Phase {
    warn!(%reason, "reasoning engine failed");
    Phase::Done {
        answer: format!("I could not complete the request because the reasoning engine failed: {reason}"),
        stop: StopReason::EngineFailure(reason),
    }
}

fn duplicate_id(requests: &[OperationRequest]) -> Option<&str> {
    let mut seen = HashSet::new();
    requests
        .iter()
        .map(|request| request.id.as_str())
        .find(|id| !seen.insert(*id))
}
