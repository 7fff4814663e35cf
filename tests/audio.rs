mod common;

mod tests {
    use crate::common::{MockPlayer, PlayerCall};
    use slipring_sword::{CueTrigger, SwordConfig};

    #[test]
    fn test_init_sets_synchronous_then_volume() {
        let mut trigger = CueTrigger::new(MockPlayer::default());
        assert!(trigger.init(&SwordConfig::DEFAULT));
        assert_eq!(
            trigger.player().calls.as_slice(),
            &[PlayerCall::SetSynchronous(true), PlayerCall::Configure(30)]
        );
    }

    #[test]
    fn test_init_reports_rejection() {
        let mut trigger = CueTrigger::new(MockPlayer {
            failing: true,
            ..Default::default()
        });
        assert!(!trigger.init(&SwordConfig::DEFAULT));
        // Both requests are still attempted
        assert_eq!(trigger.player().calls.len(), 2);
    }

    #[test]
    fn test_overlapping_cues_are_forwarded() {
        let mut trigger = CueTrigger::new(MockPlayer::default());
        assert!(trigger.request_cue(1));
        assert!(trigger.request_cue(1));
        assert_eq!(trigger.dispatched(), 2);
        assert_eq!(trigger.failed(), 0);
        assert_eq!(
            trigger.player().calls.as_slice(),
            &[PlayerCall::PlayTrack(1), PlayerCall::PlayTrack(1)]
        );
    }

    #[test]
    fn test_failed_cue_is_counted() {
        let mut trigger = CueTrigger::new(MockPlayer::default());
        trigger.player_mut().failing = true;
        assert!(!trigger.request_cue(1));
        assert_eq!(trigger.dispatched(), 1);
        assert_eq!(trigger.failed(), 1);
    }
}
