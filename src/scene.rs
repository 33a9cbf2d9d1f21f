//! Scene rotation: a round-robin state machine over the fixed scene list,
//! plus the dwell-timer task that drives it.
//!
//! Manual navigation restarts the dwell timer so a user-driven jump is not
//! immediately overridden by a pending automatic rotation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

/// One named visual arrangement of the dashboard; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Global,
    AShares,
    ShortTerm,
    Macro,
    Commodities,
    Alt,
    Events,
}

impl Scene {
    pub const ALL: [Scene; 7] = [
        Scene::Global,
        Scene::AShares,
        Scene::ShortTerm,
        Scene::Macro,
        Scene::Commodities,
        Scene::Alt,
        Scene::Events,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Scene::Global => "Global Indices",
            Scene::AShares => "A-Share Overview",
            Scene::ShortTerm => "Short-Term Flows",
            Scene::Macro => "Bonds & Macro",
            Scene::Commodities => "Commodities",
            Scene::Alt => "Alternative Assets",
            Scene::Events => "Event Countdown",
        }
    }
}

/// Round-robin scene state machine; index 0 is the initial state and there
/// is no terminal state.
///
/// The generation counter fences the dwell timer: a dwell tick that woke
/// before its task was cancelled carries a stale generation and must not
/// move the scene (abort only takes effect at the task's next await point,
/// so cancellation alone cannot stop an already-woken tick).
#[derive(Debug, Default)]
pub struct SceneScheduler {
    index: usize,
    generation: u64,
}

impl SceneScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn active(&self) -> Scene {
        Scene::ALL[self.index]
    }

    /// Generation of the current dwell; bumped whenever the dwell restarts
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance to the next scene: index = (index + 1) mod N
    pub fn advance(&mut self) -> Scene {
        self.index = (self.index + 1) % Scene::ALL.len();
        self.active()
    }

    /// Advance only when the caller's dwell generation is still current
    pub fn advance_if(&mut self, generation: u64) -> Option<Scene> {
        if generation != self.generation {
            return None;
        }
        Some(self.advance())
    }

    /// Jump to scene k (mod N); invalidates any in-flight dwell tick
    pub fn jump(&mut self, k: usize) -> Scene {
        self.generation += 1;
        self.index = k % Scene::ALL.len();
        self.active()
    }

    /// Invalidate in-flight dwell ticks without moving the scene
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }
}

/// Owns the dwell timer task on top of a shared [`SceneScheduler`].
///
/// `jump` aborts the running dwell task and starts a fresh one while
/// holding the task slot lock. Abort alone is not enough: a tick that has
/// already finished its sleep keeps running until its next await, so each
/// dwell task also carries the scheduler generation it was spawned under
/// and a stale tick advances nothing.
pub struct SceneRotor {
    scheduler: Arc<Mutex<SceneScheduler>>,
    dwell: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SceneRotor {
    /// Start rotating with the given dwell interval
    pub fn start(dwell: Duration) -> Self {
        let scheduler = Arc::new(Mutex::new(SceneScheduler::new()));
        let rotor = Self {
            scheduler,
            dwell,
            task: Mutex::new(None),
        };
        let generation = rotor
            .scheduler
            .lock()
            .expect("scheduler poisoned")
            .generation();
        let handle = rotor.spawn_dwell_task(generation);
        *rotor.task.lock().expect("dwell slot poisoned") = Some(handle);
        rotor
    }

    fn spawn_dwell_task(&self, generation: u64) -> JoinHandle<()> {
        let scheduler = Arc::clone(&self.scheduler);
        let dwell = self.dwell;
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(dwell).await;
                let advanced = scheduler
                    .lock()
                    .expect("scheduler poisoned")
                    .advance_if(generation);
                match advanced {
                    Some(scene) => debug!(scene = scene.label(), "rotated to next scene"),
                    // A jump superseded this dwell while the tick was in flight
                    None => return,
                }
            }
        })
    }

    pub fn active(&self) -> Scene {
        self.scheduler.lock().expect("scheduler poisoned").active()
    }

    pub fn active_index(&self) -> usize {
        self.scheduler
            .lock()
            .expect("scheduler poisoned")
            .active_index()
    }

    /// Manual navigation: go to scene k and grant it a full dwell interval
    pub fn jump(&self, k: usize) -> Scene {
        let mut slot = self.task.lock().expect("dwell slot poisoned");
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        let (scene, generation) = {
            let mut scheduler = self.scheduler.lock().expect("scheduler poisoned");
            let scene = scheduler.jump(k);
            (scene, scheduler.generation())
        };
        info!(scene = scene.label(), "manual scene jump");
        *slot = Some(self.spawn_dwell_task(generation));
        scene
    }

    /// Stop rotating; the active scene stays where it is
    pub fn shutdown(&self) {
        if let Some(handle) = self.task.lock().expect("dwell slot poisoned").take() {
            handle.abort();
        }
        // Fence any tick that already woke before the abort landed
        self.scheduler.lock().expect("scheduler poisoned").invalidate();
    }
}

impl Drop for SceneRotor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_mod_n() {
        let mut scheduler = SceneScheduler::new();
        assert_eq!(scheduler.active_index(), 0);
        for k in 1..=(Scene::ALL.len() * 2 + 3) {
            let scene = scheduler.advance();
            assert_eq!(scheduler.active_index(), k % Scene::ALL.len());
            assert_eq!(scene, Scene::ALL[k % Scene::ALL.len()]);
        }
    }

    #[test]
    fn test_jump_is_mod_n() {
        let mut scheduler = SceneScheduler::new();
        assert_eq!(scheduler.jump(3), Scene::Macro);
        assert_eq!(scheduler.jump(7), Scene::Global);
        assert_eq!(scheduler.jump(9), Scene::ShortTerm);
    }

    #[test]
    fn test_stale_dwell_tick_cannot_advance_after_jump() {
        let mut scheduler = SceneScheduler::new();
        // A dwell tick finishes its sleep, then a manual jump lands before
        // the tick reaches the scheduler
        let stale = scheduler.generation();
        scheduler.jump(4);
        assert_eq!(scheduler.advance_if(stale), None);
        assert_eq!(scheduler.active_index(), 4);
        // The dwell started by the jump itself still rotates
        let current = scheduler.generation();
        assert_eq!(scheduler.advance_if(current), Some(Scene::Alt));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dwell_timer_advances() {
        let dwell = Duration::from_secs(10);
        let rotor = SceneRotor::start(dwell);
        assert_eq!(rotor.active_index(), 0);

        tokio::time::sleep(dwell + Duration::from_millis(10)).await;
        assert_eq!(rotor.active_index(), 1);

        tokio::time::sleep(dwell * 2).await;
        assert_eq!(rotor.active_index(), 3);
        rotor.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_jump_restarts_dwell_timer() {
        let dwell = Duration::from_secs(10);
        let rotor = SceneRotor::start(dwell);

        // Partway through a dwell, jump manually
        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(rotor.jump(4), Scene::Commodities);

        // The old timer would have fired 3s later; the restarted one must not
        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(rotor.active_index(), 4);

        // A full dwell after the jump the rotation resumes
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(rotor.active_index(), 5);
        rotor.shutdown();
    }
}
