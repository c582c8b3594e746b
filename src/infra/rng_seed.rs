//! Мастер-seed игры и доменное расщепление потоков случайности.
//!
//! Один 32-битный seed печатается в отчёте и полностью определяет игру:
//! колоду каждой раздачи, рассадку за столом и зёрна агентов. Потоки
//! разведены по пространствам имён, чтобы лишний вызов RNG в одном
//! месте не сдвигал случайность в другом.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::HandId;
use crate::infra::rng::DeterministicRng;

/// Пространство потока колоды (индекс — номер раздачи).
const DECK_NAMESPACE: u64 = 0;
/// Пространство потока рассадки.
const ORDER_NAMESPACE: u64 = 1;
/// Пространство серий: из seed серии выводятся seed'ы отдельных игр.
const BATCH_NAMESPACE: u64 = 2;
/// База пространств агентов: агент i живёт в 1000 + i.
const AGENT_NAMESPACE_BASE: u64 = 1000;

/// Мастер-seed одной игры (32 бита, удобно печатать и передавать).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSeed(pub u64);

impl GameSeed {
    /// Взять заданный seed (обрезав до 32 бит) либо сгенерировать новый
    /// из системной энтропии.
    pub fn generate(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self(s & 0xFFFF_FFFF),
            None => {
                use rand::Rng;
                Self(rand::thread_rng().gen_range(0..=0xFFFF_FFFFu64))
            }
        }
    }

    /// Доменное расщепление мастер-seed:
    ///   derived = H(domain || seed || namespace || index)[..8]
    pub fn derive(&self, namespace: u64, index: u64) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(b"POKER_SIM_RNG_V1");
        hasher.update(self.0.to_le_bytes());
        hasher.update(namespace.to_le_bytes());
        hasher.update(index.to_le_bytes());
        let digest = hasher.finalize();

        let mut out = [0u8; 8];
        out.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(out)
    }

    /// RNG колоды: на каждую раздачу своя.
    pub fn deck_rng(&self, hand_id: HandId) -> DeterministicRng {
        DeterministicRng::from_seed(self.derive(DECK_NAMESPACE, hand_id))
    }

    /// RNG первоначальной рассадки за столом.
    pub fn order_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.derive(ORDER_NAMESPACE, 0))
    }

    /// Зерно агента с индексом `index` в исходном списке участников.
    pub fn agent_seed(&self, index: u64) -> u64 {
        self.derive(AGENT_NAMESPACE_BASE + index, 0)
    }

    /// Seed игры номер `game_id` в серии с этим мастер-seed'ом.
    pub fn batch_game_seed(&self, game_id: u64) -> u64 {
        self.derive(BATCH_NAMESPACE, game_id) & 0xFFFF_FFFF
    }
}
