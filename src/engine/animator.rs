// Animator parameter interface
//
// Abilities never touch the animator graph directly: they only flip the
// boolean parameters that the graph's transitions are conditioned on.

/// Boolean parameters driving animator transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionParameter {
    Move,
    Jump,
    ForceTransition,
    Grounded,
    Attack,
    ClickAnimation,
    Turbo,
    Turn,
    LockTransition,
}

impl TransitionParameter {
    pub const ALL: [TransitionParameter; 9] = [
        TransitionParameter::Move,
        TransitionParameter::Jump,
        TransitionParameter::ForceTransition,
        TransitionParameter::Grounded,
        TransitionParameter::Attack,
        TransitionParameter::ClickAnimation,
        TransitionParameter::Turbo,
        TransitionParameter::Turn,
        TransitionParameter::LockTransition,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Move => "Move",
            Self::Jump => "Jump",
            Self::ForceTransition => "ForceTransition",
            Self::Grounded => "Grounded",
            Self::Attack => "Attack",
            Self::ClickAnimation => "ClickAnimation",
            Self::Turbo => "Turbo",
            Self::Turn => "Turn",
            Self::LockTransition => "LockTransition",
        }
    }
}

/// What abilities may do to the animator
pub trait Animator {
    fn set_bool(&mut self, param: TransitionParameter, value: bool);

    fn get_bool(&self, param: TransitionParameter) -> bool;
}

/// Current parameter values of one animator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimatorParams {
    bools: [bool; TransitionParameter::ALL.len()],
}

impl AnimatorParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every parameter to false
    pub fn clear(&mut self) {
        self.bools = [false; TransitionParameter::ALL.len()];
    }
}

impl Animator for AnimatorParams {
    fn set_bool(&mut self, param: TransitionParameter, value: bool) {
        if self.bools[param.index()] != value {
            log::trace!("Animator param {} = {}", param.name(), value);
        }
        self.bools[param.index()] = value;
    }

    fn get_bool(&self, param: TransitionParameter) -> bool {
        self.bools[param.index()]
    }
}

/// Snapshot of the animator node an ability is attached to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateInfo {
    /// Fraction of the node's clip elapsed
    pub normalized_time: f32,
}

impl StateInfo {
    pub fn at(normalized_time: f32) -> Self {
        Self { normalized_time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense() {
        for (i, param) in TransitionParameter::ALL.iter().enumerate() {
            assert_eq!(param.index(), i);
        }
    }

    #[test]
    fn test_params_default_false() {
        let params = AnimatorParams::new();
        for param in TransitionParameter::ALL {
            assert!(!params.get_bool(param));
        }
    }

    #[test]
    fn test_set_and_clear() {
        let mut params = AnimatorParams::new();
        params.set_bool(TransitionParameter::Turbo, true);
        assert!(params.get_bool(TransitionParameter::Turbo));
        assert!(!params.get_bool(TransitionParameter::Move));

        params.clear();
        assert!(!params.get_bool(TransitionParameter::Turbo));
    }
}
