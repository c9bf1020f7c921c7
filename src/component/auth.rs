//! Screen lock

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unlocked,
    Locked { authenticate_automatically: bool },
}

/// Screen lock state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewModel {
    /// Whether the lock screen covers the app
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    TryToUnlock,
}

/// Ask the platform to authenticate; it answers with
/// [`Event::AuthenticationSucceeded`] or [`Event::AuthenticationFailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AuthenticateUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ApplicationDidBecomeActive,
    ApplicationWillResignActive,
    AuthenticationSucceeded,
    AuthenticationFailed(String),
}

impl Auth {
    pub fn new(screen_lock_enabled: bool) -> Self {
        let state = if screen_lock_enabled {
            State::Locked {
                authenticate_automatically: true,
            }
        } else {
            State::Unlocked
        };
        Self { state }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, State::Locked { .. })
    }

    pub fn view_model(&self) -> ViewModel {
        ViewModel {
            enabled: self.is_locked(),
        }
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::TryToUnlock => Some(Effect::AuthenticateUser),
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::ApplicationDidBecomeActive => match self.state {
                State::Locked {
                    authenticate_automatically: true,
                } => Some(Effect::AuthenticateUser),
                _ => None,
            },
            Event::ApplicationWillResignActive => {
                // Lock whatever the current state, ready to authenticate on return
                self.state = State::Locked {
                    authenticate_automatically: true,
                };
                None
            }
            Event::AuthenticationSucceeded => {
                self.state = State::Unlocked;
                None
            }
            Event::AuthenticationFailed(message) => {
                // Stay locked, but never retry automatically after a failure
                if self.is_locked() {
                    self.state = State::Locked {
                        authenticate_automatically: false,
                    };
                }
                log::warn!("authentication failed: {message}");
                None
            }
        }
    }
}
