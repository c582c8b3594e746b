use crate::engine::{Agent, AgentAction};
use crate::engine::snapshot::HandSnapshot;

/// Уравнивает любую ставку и никогда не повышает. Чек, когда
/// уравнивать нечего.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallingAgent;

impl Agent for CallingAgent {
    fn name(&self) -> &str {
        "caller"
    }

    fn decide(&mut self, _snapshot: &HandSnapshot) -> AgentAction {
        AgentAction::Match
    }
}
