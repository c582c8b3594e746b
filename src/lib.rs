//! Симулятор турниров безлимитного Техасского Холдема.
//!
//! Ядро — движок одной раздачи (`engine::HandEngine`): конечный автомат
//! от постинга блайндов до расчёта банков, с жёсткими инвариантами
//! сохранения фишек. Вокруг него — оценщик рук (`eval`), встроенные
//! агенты (`agents`) и турнирный прогон с эскалацией блайндов
//! (`tournament`). Вся случайность детерминирована мастер-seed'ом
//! (`infra`): одна и та же игра воспроизводится до фишки.

pub mod agents;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod tournament;
