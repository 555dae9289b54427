// Scene queries

/// Scenes the host can have active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScene {
    /// Character select screen; characters are display-only there
    CharacterSelect,
    /// Regular gameplay
    Sample,
}

impl GameScene {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CharacterSelect => "TutorialScene_CharacterSelect",
            Self::Sample => "TutorialScene_Sample",
        }
    }
}

/// Read-only view of the host's scene state
pub trait SceneQuery {
    fn is_active_scene(&self, scene: GameScene) -> bool;
}

/// Fixed active scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveScene(pub GameScene);

impl SceneQuery for ActiveScene {
    fn is_active_scene(&self, scene: GameScene) -> bool {
        self.0 == scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_scene_query() {
        let scene = ActiveScene(GameScene::Sample);
        assert!(scene.is_active_scene(GameScene::Sample));
        assert!(!scene.is_active_scene(GameScene::CharacterSelect));
    }

    #[test]
    fn test_scene_names() {
        assert_eq!(
            GameScene::CharacterSelect.name(),
            "TutorialScene_CharacterSelect"
        );
    }
}
