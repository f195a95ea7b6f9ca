//! Behaviour risk from the client's mouse-interaction heuristic.

use riskgate_core::constants::{
    BEHAVIOR_RISK_BOT, BEHAVIOR_RISK_HUMAN, BEHAVIOR_RISK_SUSPICIOUS, MOUSE_BOT_FROM,
    MOUSE_SUSPICIOUS_FROM,
};

/// Map a mouse heuristic score (nominally 0–100) to a behaviour risk bucket.
///
/// Out-of-range inputs fall into the nearest bucket rather than erroring.
pub fn behavior_risk(mouse_score: i32) -> f64 {
    if mouse_score < MOUSE_SUSPICIOUS_FROM {
        BEHAVIOR_RISK_HUMAN
    } else if mouse_score < MOUSE_BOT_FROM {
        BEHAVIOR_RISK_SUSPICIOUS
    } else {
        BEHAVIOR_RISK_BOT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries() {
        assert_eq!(behavior_risk(0), 0.0);
        assert_eq!(behavior_risk(29), 0.0);
        assert_eq!(behavior_risk(30), 50.0);
        assert_eq!(behavior_risk(69), 50.0);
        assert_eq!(behavior_risk(70), 90.0);
        assert_eq!(behavior_risk(100), 90.0);
    }

    #[test]
    fn out_of_range_inputs_clamp_to_edge_buckets() {
        assert_eq!(behavior_risk(-5), 0.0);
        assert_eq!(behavior_risk(i32::MIN), 0.0);
        assert_eq!(behavior_risk(250), 90.0);
        assert_eq!(behavior_risk(i32::MAX), 90.0);
    }

    proptest! {
        #[test]
        fn monotonic(a in any::<i32>(), b in any::<i32>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(behavior_risk(lo) <= behavior_risk(hi));
        }
    }
}
