use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::{info, warn};

use crate::agent::Agent;
use crate::config::Settings;
use crate::errors::{AgentResult, ProviderError};
use crate::providers::base::Provider;
use crate::roles;

/// Specialist identity a task can be handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Planner,
    Coder,
}

/// One audit entry per delegation attempt, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationRecord {
    pub agent: AgentRole,
    pub task: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Keyword rules that decide which specialists a composite task needs.
/// Matching is case-insensitive substring search.
#[derive(Debug, Clone)]
pub struct DelegationPolicy {
    pub plan_markers: Vec<String>,
    pub code_keywords: Vec<String>,
}

impl Default for DelegationPolicy {
    fn default() -> Self {
        Self {
            plan_markers: vec!["plan".to_string(), "complex".to_string()],
            code_keywords: vec![
                "code".to_string(),
                "implement".to_string(),
                "write".to_string(),
                "create file".to_string(),
            ],
        }
    }
}

impl DelegationPolicy {
    /// Whether the orchestrator's analysis calls for an explicit plan.
    pub fn needs_plan(&self, analysis: &str) -> bool {
        let analysis = analysis.to_lowercase();
        self.plan_markers.iter().any(|m| analysis.contains(m))
    }

    /// Whether the task itself calls for code work.
    pub fn needs_code(&self, task: &str) -> bool {
        let task = task.to_lowercase();
        self.code_keywords.iter().any(|k| task.contains(k))
    }
}

/// Sequential multi-agent driver: an orchestrator agent that analyzes and
/// synthesizes, plus planner and coder specialists it delegates to. Every
/// delegation is recorded in an audit log.
pub struct Coordinator {
    agent: Agent,
    planner: Agent,
    coder: Agent,
    policy: DelegationPolicy,
    delegation_log: Vec<DelegationRecord>,
}

impl Coordinator {
    pub fn new(agent: Agent, planner: Agent, coder: Agent) -> Self {
        Self {
            agent,
            planner,
            coder,
            policy: DelegationPolicy::default(),
            delegation_log: Vec::new(),
        }
    }

    /// Build a coordinator whose three agents share one gateway.
    pub fn with_provider(provider: Arc<dyn Provider>, settings: &Settings) -> AgentResult<Self> {
        Ok(Self::new(
            roles::orchestrator_agent(provider.clone()),
            roles::planner_agent(provider.clone()),
            roles::coder_agent(provider, settings)?,
        ))
    }

    pub fn with_policy(mut self, policy: DelegationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn log(&self) -> &[DelegationRecord] {
        &self.delegation_log
    }

    pub fn clear_log(&mut self) {
        self.delegation_log.clear();
    }

    /// Hand `task` to the named specialist and record the outcome. Exactly
    /// one record is appended per call, failure included; the error is then
    /// re-raised.
    pub async fn delegate(
        &mut self,
        role: AgentRole,
        task: &str,
        context: Option<&HashMap<String, String>>,
    ) -> Result<String, ProviderError> {
        info!(role = %role, "delegating task");

        let specialist = match role {
            AgentRole::Planner => &mut self.planner,
            AgentRole::Coder => &mut self.coder,
        };

        match specialist.execute(task, context).await {
            Ok(result) => {
                self.delegation_log.push(DelegationRecord {
                    agent: role,
                    task: task.to_string(),
                    success: true,
                    error: None,
                });
                Ok(result)
            }
            Err(e) => {
                warn!(role = %role, error = %e, "delegation failed");
                self.delegation_log.push(DelegationRecord {
                    agent: role,
                    task: task.to_string(),
                    success: false,
                    error: Some(e.to_string()),
                });
                Err(e)
            }
        }
    }

    /// Drive a composite task end to end: analyze, optionally plan,
    /// optionally code, then synthesize a final answer.
    ///
    /// The plan and code branches are decided independently; a task can take
    /// both, either, or neither.
    pub async fn run_composite(&mut self, task: &str) -> Result<String, ProviderError> {
        let analysis = self
            .agent
            .execute(
                &format!("Analyze this task and decide on execution strategy: {}", task),
                None,
            )
            .await?;

        let plan = if self.policy.needs_plan(&analysis) {
            Some(self.delegate(AgentRole::Planner, task, None).await?)
        } else {
            None
        };

        let result = if self.policy.needs_code(task) {
            match &plan {
                Some(plan) => {
                    let mut context = HashMap::new();
                    context.insert("plan".to_string(), plan.clone());
                    self.delegate(
                        AgentRole::Coder,
                        &format!("Execute this plan:\n\n{}", plan),
                        Some(&context),
                    )
                    .await?
                }
                None => self.delegate(AgentRole::Coder, task, None).await?,
            }
        } else {
            plan.unwrap_or(analysis)
        };

        self.agent
            .execute(
                &format!(
                    "Synthesize these results into a final response:\n\nTask: {}\n\nResults:\n{}",
                    task, result
                ),
                None,
            )
            .await
    }
}
