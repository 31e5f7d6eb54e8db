//! Pure state machine for location authorization and sensing.
//!
//! `transition` never performs side effects. It returns the next state and the
//! effects the caller must carry out, in order.

use super::service::SensingError;
use super::state::{Advisory, AuthorizationState, LocationState};
use crate::geo::GeoCoordinate;

#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    /// Ask for permission if it has not been decided yet
    PermissionRequested,
    /// The platform reported a new authorization status
    AuthorizationChanged(AuthorizationState),
    Fix(GeoCoordinate),
    SensingFailed(SensingError),
    /// The user asked to locate them again
    RestartRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SensorEffect {
    PromptForPermission,
    StartSensing,
    StopSensing,
    RecenterMap(GeoCoordinate),
    Advise(Advisory),
    ReportSensingFailure(SensingError),
}

pub fn transition(state: &LocationState, event: LocationEvent) -> (LocationState, Vec<SensorEffect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        LocationEvent::PermissionRequested => {
            if !next.services_enabled {
                report_services_disabled(&mut next, &mut effects);
            } else if next.authorization == AuthorizationState::NotDetermined {
                effects.push(SensorEffect::PromptForPermission);
            }
        }
        LocationEvent::AuthorizationChanged(status) => {
            if !next.services_enabled {
                report_services_disabled(&mut next, &mut effects);
                return (next, effects);
            }

            let previous = next.authorization;
            next.authorization = status;

            if status != AuthorizationState::Authorized && next.sensing {
                next.sensing = false;
                effects.push(SensorEffect::StopSensing);
                // Revoked before the first fix: the next grant starts sensing again
                if next.current_location.is_none() {
                    next.sensing_started = false;
                }
            }

            match status {
                AuthorizationState::NotDetermined => {
                    effects.push(SensorEffect::PromptForPermission);
                }
                AuthorizationState::Denied => {
                    if previous != AuthorizationState::Denied {
                        effects.push(SensorEffect::Advise(Advisory::PermissionDenied));
                    }
                }
                AuthorizationState::Restricted => {
                    if previous != AuthorizationState::Restricted {
                        effects.push(SensorEffect::Advise(Advisory::PermissionRestricted));
                    }
                }
                AuthorizationState::Authorized => {
                    if !next.sensing_started {
                        next.sensing_started = true;
                        next.sensing = true;
                        effects.push(SensorEffect::StartSensing);
                    }
                }
            }
        }
        LocationEvent::Fix(coordinate) => {
            // A fix from a run that was already stopped is stale
            if !next.sensing {
                return (next, effects);
            }
            next.current_location = Some(coordinate);
            // One fix is enough: the map does not follow the user
            next.sensing = false;
            effects.push(SensorEffect::StopSensing);
            effects.push(SensorEffect::RecenterMap(coordinate));
        }
        LocationEvent::SensingFailed(error) => {
            next.sensing = false;
            effects.push(SensorEffect::ReportSensingFailure(error));
        }
        LocationEvent::RestartRequested => {
            if next.services_enabled
                && next.authorization == AuthorizationState::Authorized
                && !next.sensing
            {
                next.sensing_started = true;
                next.sensing = true;
                effects.push(SensorEffect::StartSensing);
            }
        }
    }

    (next, effects)
}

fn report_services_disabled(next: &mut LocationState, effects: &mut Vec<SensorEffect>) {
    if !next.services_reported {
        next.services_reported = true;
        effects.push(SensorEffect::Advise(Advisory::ServicesDisabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: Vec<LocationEvent>) -> (LocationState, Vec<SensorEffect>) {
        let mut state = LocationState::default();
        let mut all_effects = Vec::new();
        for event in events {
            let (next, effects) = transition(&state, event);
            state = next;
            all_effects.extend(effects);
        }
        (state, all_effects)
    }

    fn starts(effects: &[SensorEffect]) -> usize {
        effects
            .iter()
            .filter(|e| **e == SensorEffect::StartSensing)
            .count()
    }

    #[test]
    fn test_request_prompts_only_when_undetermined() {
        let (_, effects) = run(vec![LocationEvent::PermissionRequested]);
        assert_eq!(effects, vec![SensorEffect::PromptForPermission]);

        let (_, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Denied),
            LocationEvent::PermissionRequested,
        ]);
        assert!(!effects.contains(&SensorEffect::PromptForPermission));
    }

    #[test]
    fn test_authorized_starts_sensing_once() {
        let (state, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
        ]);
        assert_eq!(starts(&effects), 1);
        assert!(state.sensing);
    }

    #[test]
    fn test_regrant_before_first_fix_starts_again() {
        let (state, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::AuthorizationChanged(AuthorizationState::Denied),
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
        ]);
        assert_eq!(starts(&effects), 2);
        assert!(state.sensing);
        assert_eq!(state.authorization, AuthorizationState::Authorized);
    }

    #[test]
    fn test_regrant_after_fix_does_not_start() {
        let fix = GeoCoordinate::new(35.0, 139.0);
        let (state, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::Fix(fix),
            LocationEvent::AuthorizationChanged(AuthorizationState::Denied),
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
        ]);
        assert_eq!(starts(&effects), 1);
        assert_eq!(state.current_location, Some(fix));
        assert!(!state.sensing);
    }

    #[test]
    fn test_fix_after_revocation_is_ignored() {
        let (state, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::AuthorizationChanged(AuthorizationState::Denied),
            LocationEvent::Fix(GeoCoordinate::new(35.0, 139.0)),
        ]);
        assert_eq!(state.current_location, None);
        assert!(!effects
            .iter()
            .any(|e| matches!(e, SensorEffect::RecenterMap(_))));
    }

    #[test]
    fn test_sensing_never_starts_without_authorization() {
        let (state, effects) = run(vec![
            LocationEvent::PermissionRequested,
            LocationEvent::AuthorizationChanged(AuthorizationState::Denied),
            LocationEvent::AuthorizationChanged(AuthorizationState::Restricted),
            LocationEvent::RestartRequested,
        ]);
        assert_eq!(starts(&effects), 0);
        assert!(!state.sensing);
    }

    #[test]
    fn test_denied_advises_once() {
        let (_, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Denied),
            LocationEvent::AuthorizationChanged(AuthorizationState::Denied),
        ]);
        assert_eq!(
            effects,
            vec![SensorEffect::Advise(Advisory::PermissionDenied)]
        );
    }

    #[test]
    fn test_restricted_advises() {
        let (state, effects) = run(vec![LocationEvent::AuthorizationChanged(
            AuthorizationState::Restricted,
        )]);
        assert_eq!(
            effects,
            vec![SensorEffect::Advise(Advisory::PermissionRestricted)]
        );
        assert_eq!(state.authorization, AuthorizationState::Restricted);
    }

    #[test]
    fn test_first_fix_records_location_and_stops_sensing() {
        let fix = GeoCoordinate::new(35.0, 139.0);
        let (state, effects) = run(vec![
            LocationEvent::PermissionRequested,
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::Fix(fix),
        ]);

        assert_eq!(state.current_location, Some(fix));
        assert!(!state.sensing);
        assert_eq!(
            effects,
            vec![
                SensorEffect::PromptForPermission,
                SensorEffect::StartSensing,
                SensorEffect::StopSensing,
                SensorEffect::RecenterMap(fix),
            ]
        );
    }

    #[test]
    fn test_restart_overwrites_location() {
        let first = GeoCoordinate::new(35.0, 139.0);
        let second = GeoCoordinate::new(35.5, 139.5);
        let (state, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::Fix(first),
            LocationEvent::RestartRequested,
            LocationEvent::Fix(second),
        ]);
        assert_eq!(state.current_location, Some(second));
        assert_eq!(starts(&effects), 2);
        assert!(!state.sensing);
    }

    #[test]
    fn test_restart_ignored_while_sensing() {
        let (_, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::RestartRequested,
        ]);
        assert_eq!(starts(&effects), 1);
    }

    #[test]
    fn test_sensing_failure_keeps_location() {
        let fix = GeoCoordinate::new(35.0, 139.0);
        let error = SensingError::LocationUnknown;
        let (state, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::Fix(fix),
            LocationEvent::RestartRequested,
            LocationEvent::SensingFailed(error.clone()),
        ]);
        assert_eq!(state.current_location, Some(fix));
        assert!(!state.sensing);
        assert_eq!(
            effects.last(),
            Some(&SensorEffect::ReportSensingFailure(error))
        );
    }

    #[test]
    fn test_revoking_authorization_stops_sensing() {
        let (state, effects) = run(vec![
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
            LocationEvent::AuthorizationChanged(AuthorizationState::Denied),
        ]);
        assert!(!state.sensing);
        assert!(effects.contains(&SensorEffect::StopSensing));
    }

    #[test]
    fn test_services_disabled_reported_once_and_nothing_else() {
        let disabled = LocationState {
            services_enabled: false,
            ..Default::default()
        };
        let (state, effects) = transition(&disabled, LocationEvent::PermissionRequested);
        assert_eq!(effects, vec![SensorEffect::Advise(Advisory::ServicesDisabled)]);

        let (state, effects) = transition(
            &state,
            LocationEvent::AuthorizationChanged(AuthorizationState::Authorized),
        );
        assert!(effects.is_empty());
        assert!(!state.sensing);
        assert_eq!(state.authorization, AuthorizationState::NotDetermined);
    }

    #[test]
    fn test_undetermined_notification_prompts() {
        let (_, effects) = run(vec![LocationEvent::AuthorizationChanged(
            AuthorizationState::NotDetermined,
        )]);
        assert_eq!(effects, vec![SensorEffect::PromptForPermission]);
    }
}
