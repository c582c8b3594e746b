use crate::engine::{Agent, AgentAction};
use crate::engine::snapshot::HandSnapshot;

/// Пуш всем стеком на каждом ходу. Полезен как стресс для раскладки
/// банков: за столом из таких агентов каждая раздача — сплошные
/// олл-ины с сайд-потами.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllInAgent;

impl Agent for AllInAgent {
    fn name(&self) -> &str {
        "all-in"
    }

    fn decide(&mut self, snapshot: &HandSnapshot) -> AgentAction {
        // Ставка всем стеком легальна всегда, даже когда на полный
        // рейз денег не хватает.
        AgentAction::Increase(snapshot.your_status.stack)
    }
}
