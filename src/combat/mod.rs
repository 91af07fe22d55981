pub mod damage;
pub mod resolve;

pub use damage::apply_typed_damage;
pub use resolve::{opposed_roll, resolve_attack, AttackOutcome};
