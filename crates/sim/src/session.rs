use islewalk_agents::{Agent, NpcRoster, Player};
use islewalk_common::EntityId;
use islewalk_input::{Action, FollowCamera};
use islewalk_kernel::World;
use islewalk_motion::Retarget;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{SimConfig, SimError};

/// What an action did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Player(Retarget),
    Camera,
    Regenerated { seed: u64 },
    NpcAdded(EntityId),
    /// `None` when there was no NPC left to remove.
    NpcRemoved(Option<EntityId>),
    Ignored,
}

/// A running island: world, player, NPCs and the camera following the player.
pub struct Session {
    config: SimConfig,
    world: World,
    player: Player,
    npcs: NpcRoster,
    camera: FollowCamera,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Session {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let world = World::new(config.world.clone())?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let player = Player::new(&config.player);
        let npcs = NpcRoster::populated(config.npcs, &world, &mut rng);
        let mut camera = FollowCamera::new(config.camera);
        camera.track(player.position());
        tracing::info!(
            width = config.world.width,
            height = config.world.height,
            seed = world.seed(),
            npcs = npcs.len(),
            "session started"
        );
        Ok(Self {
            config,
            world,
            player,
            npcs,
            camera,
            rng,
            tick: 0,
        })
    }

    pub fn handle(&mut self, action: Action) -> Outcome {
        match action {
            Action::PointerPick(pos) => Outcome::Player(self.player.pointer_pick(pos, &self.world)),
            camera if camera.is_camera() => {
                self.camera.apply(&camera);
                Outcome::Camera
            }
            Action::Regenerate => {
                let seed = self.world.regenerate();
                tracing::info!(seed, "world regenerated");
                Outcome::Regenerated { seed }
            }
            Action::AddNpc => {
                let id = self.npcs.add(&self.world, &mut self.rng);
                tracing::debug!(?id, total = self.npcs.len(), "npc added");
                Outcome::NpcAdded(id)
            }
            Action::RemoveNpc => {
                let removed = self.npcs.remove().map(|npc| npc.id());
                tracing::debug!(?removed, total = self.npcs.len(), "npc removed");
                Outcome::NpcRemoved(removed)
            }
            _ => Outcome::Ignored,
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.player.update(dt, &self.world);
        self.npcs.update(dt, &self.world, &mut self.rng);
        self.camera.track(self.player.position());
        self.tick += 1;
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn npcs(&self) -> &NpcRoster {
        &self.npcs
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Frames stepped so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
