//! Factory functions for the stock agent roles used by the coordinator.

use std::sync::Arc;

use indoc::indoc;

use crate::agent::Agent;
use crate::config::Settings;
use crate::errors::AgentResult;
use crate::providers::base::Provider;
use crate::tools::{CodeExecute, FileRead, FileWrite, ListDirectory};

/// The orchestrator analyzes incoming tasks and synthesizes specialist
/// output. It carries no tools of its own.
pub fn orchestrator_agent(provider: Arc<dyn Provider>) -> Agent {
    Agent::new(
        "orchestrator",
        indoc! {"
            You are an orchestrator that coordinates work across specialist
            agents. When asked to analyze a task, decide whether it is simple
            enough to answer directly or whether it needs a plan before
            execution; say so explicitly, using the word 'plan' or 'complex'
            when planning is required. When asked to synthesize results,
            produce a single clear final response for the user.
        "},
        provider,
    )
}

/// The planner turns a task into a short, numbered step-by-step plan.
pub fn planner_agent(provider: Arc<dyn Provider>) -> Agent {
    Agent::new(
        "planner",
        indoc! {"
            You are a planning specialist. Break the given task into a short
            numbered list of concrete steps. Each step should be actionable
            on its own. Do not execute anything; only plan.
        "},
        provider,
    )
}

/// The coder writes and manipulates files and can run code snippets. It
/// gets the filesystem tools plus `code_execute`.
pub fn coder_agent(provider: Arc<dyn Provider>, settings: &Settings) -> AgentResult<Agent> {
    let mut agent = Agent::new(
        "coder",
        indoc! {"
            You are a coding specialist. Implement the requested change using
            the available tools: read existing files before modifying them,
            write complete file contents, list directories to orient
            yourself, and execute code to verify your work. Report what you
            changed in your final answer.
        "},
        provider,
    );

    agent.add_tool(Box::new(FileRead))?;
    agent.add_tool(Box::new(FileWrite))?;
    agent.add_tool(Box::new(ListDirectory))?;
    agent.add_tool(Box::new(CodeExecute::new(settings)))?;

    Ok(agent)
}
