//! Animation playback and rule driven clip selection.
//!
//! [`Animation`] plays one clip from the
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore).
//! [`AnimationController`] picks which clip should play by evaluating
//! [`Condition`] rules against the entity's
//! [`Signals`](crate::components::signals::Signals); the first matching rule
//! wins, otherwise the fallback clip plays.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::signals::Signals;

/// Playback state of one animation clip.
///
/// Non looped clips hold their last frame once played through.
#[derive(Component, Debug, Clone, Deserialize, Serialize)]
pub struct Animation {
    /// Key into the animation store.
    pub key: String,
    /// Current frame index into the clip.
    pub frame: usize,
    /// Seconds accumulated toward the next frame step.
    pub timer: f32,
}

impl Animation {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            frame: 0,
            timer: 0.0,
        }
    }

    /// Restart playback, switching to `key` if it differs.
    pub fn restart(&mut self, key: &str) {
        if self.key != key {
            self.key = key.to_string();
        }
        self.frame = 0;
        self.timer = 0.0;
    }
}

/// Comparison operator used by scalar and integer conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CmpOp {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl CmpOp {
    /// Exact comparison, used for integer signals.
    pub fn compare<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            CmpOp::Less => lhs < rhs,
            CmpOp::LessEqual => lhs <= rhs,
            CmpOp::Greater => lhs > rhs,
            CmpOp::GreaterEqual => lhs >= rhs,
            CmpOp::Equal => lhs == rhs,
            CmpOp::NotEqual => lhs != rhs,
        }
    }

    /// Float comparison; equality checks carry an epsilon tolerance.
    pub fn compare_approx(self, lhs: f32, rhs: f32) -> bool {
        match self {
            CmpOp::Equal => (lhs - rhs).abs() < f32::EPSILON,
            CmpOp::NotEqual => (lhs - rhs).abs() >= f32::EPSILON,
            op => op.compare(lhs, rhs),
        }
    }
}

/// Predicate over an entity's signals.
///
/// Comparisons and ranges over a missing signal evaluate to false.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum Condition {
    /// Compare a scalar signal against a constant.
    ScalarCmp {
        signal: String,
        op: CmpOp,
        value: f32,
    },
    /// Scalar signal inside `[min, max]`, inclusive.
    ScalarRange { signal: String, min: f32, max: f32 },
    /// Compare an integer signal against a constant.
    IntegerCmp {
        signal: String,
        op: CmpOp,
        value: i32,
    },
    /// Integer signal inside `[min, max]`, inclusive.
    IntegerRange { signal: String, min: i32, max: i32 },
    /// Flag is present.
    HasFlag(String),
    /// Flag is absent.
    LacksFlag(String),
    /// Every condition holds. Empty means true.
    All(Vec<Condition>),
    /// At least one condition holds. Empty means false.
    Any(Vec<Condition>),
    /// The condition does not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// True when the predicate holds for the given signal set.
    pub fn eval(&self, signals: &Signals) -> bool {
        match self {
            Condition::ScalarCmp { signal, op, value } => signals
                .get_scalar(signal)
                .is_some_and(|current| op.compare_approx(current, *value)),
            Condition::ScalarRange { signal, min, max } => signals
                .get_scalar(signal)
                .is_some_and(|current| (*min..=*max).contains(&current)),
            Condition::IntegerCmp { signal, op, value } => signals
                .get_integer(signal)
                .is_some_and(|current| op.compare(current, *value)),
            Condition::IntegerRange { signal, min, max } => signals
                .get_integer(signal)
                .is_some_and(|current| (*min..=*max).contains(&current)),
            Condition::HasFlag(flag) => signals.has_flag(flag),
            Condition::LacksFlag(flag) => !signals.has_flag(flag),
            Condition::All(conditions) => conditions.iter().all(|c| c.eval(signals)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.eval(signals)),
            Condition::Not(inner) => !inner.eval(signals),
        }
    }
}

/// One rule of an [`AnimationController`]: play `key` while `condition`
/// holds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimRule {
    pub condition: Condition,
    pub key: String,
}

/// Picks the clip to play from the entity's signals.
///
/// Rules are evaluated in order and the first match wins; with no match the
/// fallback clip plays. Built with [`with_rule`](Self::with_rule):
///
/// ```ignore
/// AnimationController::new("player_idle")
///     .with_rule(Condition::LacksFlag("grounded".into()), "player_jump")
///     .with_rule(
///         Condition::ScalarCmp {
///             signal: "speed".into(),
///             op: CmpOp::Greater,
///             value: 5.0,
///         },
///         "player_run",
///     )
/// ```
#[derive(Component, Debug, Clone, Deserialize, Serialize)]
pub struct AnimationController {
    pub rules: Vec<AnimRule>,
    pub fallback_key: String,
}

impl AnimationController {
    pub fn new(fallback_key: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback_key: fallback_key.into(),
        }
    }

    pub fn with_rule(mut self, condition: Condition, key: impl Into<String>) -> Self {
        self.rules.push(AnimRule {
            condition,
            key: key.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_op_exact() {
        assert!(CmpOp::Less.compare(2, 3));
        assert!(!CmpOp::Less.compare(3, 3));
        assert!(CmpOp::LessEqual.compare(3, 3));
        assert!(CmpOp::Greater.compare(4, 3));
        assert!(CmpOp::GreaterEqual.compare(3, 3));
        assert!(CmpOp::Equal.compare(3, 3));
        assert!(CmpOp::NotEqual.compare(3, 4));
        assert!(!CmpOp::NotEqual.compare(3, 3));
    }

    #[test]
    fn test_cmp_op_approx() {
        assert!(CmpOp::Equal.compare_approx(1.0, 1.0));
        assert!(!CmpOp::Equal.compare_approx(1.0, 1.1));
        assert!(CmpOp::NotEqual.compare_approx(1.0, 1.1));
        assert!(CmpOp::Greater.compare_approx(2.0, 1.0));
    }

    #[test]
    fn test_scalar_cmp_reads_the_signal() {
        let signals = Signals::default().with_scalar("speed", 10.0);
        let faster_than_5 = Condition::ScalarCmp {
            signal: "speed".to_string(),
            op: CmpOp::Greater,
            value: 5.0,
        };
        assert!(faster_than_5.eval(&signals));
        // unset signal never matches
        assert!(!faster_than_5.eval(&Signals::default()));
    }

    #[test]
    fn test_ranges_include_their_endpoints() {
        let hp = |v| Signals::default().with_scalar("hp", v);
        let cond = Condition::ScalarRange {
            signal: "hp".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert!(cond.eval(&hp(0.0)));
        assert!(cond.eval(&hp(100.0)));
        assert!(!cond.eval(&hp(100.5)));
    }

    #[test]
    fn test_integer_conditions() {
        let signals = Signals::default().with_integer("coins", 3);
        let exactly_3 = Condition::IntegerCmp {
            signal: "coins".to_string(),
            op: CmpOp::Equal,
            value: 3,
        };
        let up_to_2 = Condition::IntegerRange {
            signal: "coins".to_string(),
            min: 0,
            max: 2,
        };
        assert!(exactly_3.eval(&signals));
        assert!(!up_to_2.eval(&signals));
        assert!(!exactly_3.eval(&Signals::default()));
    }

    #[test]
    fn test_flag_presence_and_absence() {
        let grounded = Signals::default().with_flag("grounded");
        assert!(Condition::HasFlag("grounded".to_string()).eval(&grounded));
        assert!(!Condition::LacksFlag("grounded".to_string()).eval(&grounded));
        assert!(Condition::LacksFlag("grounded".to_string()).eval(&Signals::default()));
    }

    #[test]
    fn test_combinators() {
        let signals = Signals::default().with_flag("a");
        let has = Condition::HasFlag("a".to_string());
        let lacks = Condition::LacksFlag("a".to_string());
        assert!(Condition::All(vec![has.clone(), has.clone()]).eval(&signals));
        assert!(!Condition::All(vec![has.clone(), lacks.clone()]).eval(&signals));
        assert!(Condition::Any(vec![lacks.clone(), has.clone()]).eval(&signals));
        assert!(!Condition::Not(Box::new(has)).eval(&signals));
        // empty All holds, empty Any does not
        assert!(Condition::All(Vec::new()).eval(&signals));
        assert!(!Condition::Any(Vec::new()).eval(&signals));
    }

    #[test]
    fn test_condition_parses_from_json() {
        let json = r#"{
            "All": [
                { "LacksFlag": "grounded" },
                { "ScalarCmp": { "signal": "vspeed", "op": "Less", "value": 0.0 } }
            ]
        }"#;
        let falling: Condition = serde_json::from_str(json).unwrap();
        let airborne = Signals::default().with_scalar("vspeed", -3.0);
        assert!(falling.eval(&airborne));
        assert!(!falling.eval(&Signals::default().with_flag("grounded")));
    }

    #[test]
    fn test_restart_resets_playback() {
        let mut anim = Animation::new("idle");
        anim.frame = 4;
        anim.timer = 0.05;
        anim.restart("run");
        assert_eq!(anim.key, "run");
        assert_eq!(anim.frame, 0);
        assert_eq!(anim.timer, 0.0);
    }

    #[test]
    fn test_controller_builder_keeps_rule_order() {
        let controller = AnimationController::new("idle")
            .with_rule(Condition::HasFlag("jumping".to_string()), "jump")
            .with_rule(Condition::HasFlag("running".to_string()), "run");
        assert_eq!(controller.rules.len(), 2);
        assert_eq!(controller.rules[0].key, "jump");
        assert_eq!(controller.fallback_key, "idle");
    }
}
