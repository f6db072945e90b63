//! The world aggregate: state, clock, schedule and the guarded mutation
//! paths layered on top of them.
//!
//! All cell content flows through [`World::try_place_blocks`] and all block
//! damage through [`World::deal_block_damage`]. Both paths consult the
//! guards registered on the [`EventHub`] before touching state, which is
//! what lets the block mover protect its transitional cells without owning
//! the world.

use tracing::{debug, warn};

use crate::block::{BlockCatalog, BlockDef, BlockId};
use crate::config::WorldConfig;
use crate::damage::{BlockDamage, DamageOutcome, DamageVerdict};
use crate::event::{EventHub, MoveTransition, PlacementVerdict};
use crate::placement::{CellChange, PlaceBlocksRequest, PlaceError, PlacedBlocks};
use crate::schedule::DelaySchedule;
use crate::state::{CellGrid, CellPos, EntityId, EntityStore, GameClock, ResourceMeter, TimeMs};

/// Single-threaded simulation state for one voxel world.
pub struct World {
    config: WorldConfig,
    clock: GameClock,
    catalog: BlockCatalog,
    grid: CellGrid,
    entities: EntityStore,
    schedule: DelaySchedule,
    hub: EventHub,
}

impl World {
    pub fn new(config: WorldConfig, catalog: BlockCatalog) -> Self {
        Self {
            config,
            clock: GameClock::default(),
            catalog,
            grid: CellGrid::new(),
            entities: EntityStore::new(),
            schedule: DelaySchedule::new(),
            hub: EventHub::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Current simulated time.
    pub fn now(&self) -> TimeMs {
        self.clock.now()
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut BlockCatalog {
        &mut self.catalog
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    pub fn schedule(&self) -> &DelaySchedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut DelaySchedule {
        &mut self.schedule
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn hub_mut(&mut self) -> &mut EventHub {
        &mut self.hub
    }

    /// Block currently stored at `pos`; air when unset.
    pub fn block_at(&self, pos: CellPos) -> BlockId {
        self.grid.block_at(pos)
    }

    /// Definition of the block at `pos`, if its id is known to the catalog.
    pub fn block_def_at(&self, pos: CellPos) -> Option<&BlockDef> {
        self.catalog.get(self.block_at(pos))
    }

    /// Returns true when `pos` may be overwritten by a new placement.
    pub fn is_replaceable(&self, pos: CellPos) -> bool {
        self.block_def_at(pos).is_some_and(|def| def.is_replaceable())
    }

    /// Entity bound to the block at `pos`, created on first access.
    ///
    /// Fresh bindings inherit the block definition's template and start with
    /// a full durability meter (none for indestructible blocks). Committing
    /// a mutation at a cell destroys the previous binding, so the entity
    /// returned here always describes the current block.
    pub fn block_entity_at(&mut self, pos: CellPos) -> EntityId {
        if let Some(entity) = self.grid.binding(pos) {
            if self.entities.is_alive(entity) {
                return entity;
            }
        }

        let (template, durability) = match self.block_def_at(pos) {
            Some(def) if !def.is_indestructible() => {
                (def.template.clone(), Some(ResourceMeter::full(def.durability)))
            }
            Some(def) => (def.template.clone(), None),
            None => (None, None),
        };

        let entity = self.entities.create_from_template(template.as_deref());
        if let Some(record) = self.entities.record_mut(entity) {
            record.location = Some(pos);
            record.durability = durability;
        }
        self.grid.bind(pos, entity);
        entity
    }

    /// Validates, guards and commits a placement batch.
    ///
    /// Guards run in priority order and the first veto rejects the whole
    /// batch with no partial commit. On success every assignment is written,
    /// stale cell bindings are destroyed and observers receive the receipt.
    pub fn try_place_blocks(
        &mut self,
        request: PlaceBlocksRequest,
    ) -> Result<PlacedBlocks, PlaceError> {
        if request.assignments.is_empty() {
            return Err(PlaceError::EmptyBatch);
        }
        if request.assignments.len() > WorldConfig::MAX_CELLS_PER_BATCH {
            return Err(PlaceError::BatchTooLarge {
                len: request.assignments.len(),
                max: WorldConfig::MAX_CELLS_PER_BATCH,
            });
        }
        for &(_, block) in &request.assignments {
            if !self.catalog.contains(block) {
                return Err(PlaceError::UnknownBlock(block));
            }
        }

        for guard in self.hub.placement_guards() {
            if guard.inspect(self, &request) == PlacementVerdict::Veto {
                debug!(
                    target: "world::placement",
                    guard = guard.name(),
                    issuer = %request.issuer,
                    "placement vetoed"
                );
                return Err(PlaceError::Vetoed);
            }
        }

        let mut changes = Vec::with_capacity(request.assignments.len());
        for &(pos, block) in &request.assignments {
            let previous = self.grid.set_block(pos, block);
            if let Some(stale) = self.grid.unbind(pos) {
                self.entities.destroy(stale);
            }
            changes.push(CellChange {
                pos,
                previous,
                block,
            });
        }
        let placed = PlacedBlocks {
            issuer: request.issuer,
            changes,
        };

        for observer in self.hub.placement_observers() {
            observer.on_blocks_placed(self, &placed);
        }

        Ok(placed)
    }

    /// Runs a damage application through the damage guards and, when
    /// allowed, against the target's durability meter.
    ///
    /// Durability reaching zero removes the block through the guarded
    /// placement path, attributed to the damage instigator; a refused
    /// removal leaves the block standing at zero durability.
    pub fn deal_block_damage(&mut self, damage: BlockDamage) -> DamageOutcome {
        let Some(pos) = self
            .entities
            .record(damage.target)
            .and_then(|record| record.location)
        else {
            debug!(
                target: "world::damage",
                target = %damage.target,
                "damage target has no cell anchor"
            );
            return DamageOutcome::Ignored;
        };

        for guard in self.hub.damage_guards() {
            if guard.before_block_damage(self, &damage) == DamageVerdict::Cancel {
                debug!(
                    target: "world::damage",
                    guard = guard.name(),
                    target = %damage.target,
                    "damage cancelled"
                );
                return DamageOutcome::Cancelled;
            }
        }

        let destructible = self
            .block_def_at(pos)
            .is_some_and(|def| !def.is_indestructible());
        if !destructible {
            return DamageOutcome::Ignored;
        }

        let remaining = match self
            .entities
            .record_mut(damage.target)
            .and_then(|record| record.durability.as_mut())
        {
            Some(meter) => meter.deplete(damage.amount),
            None => return DamageOutcome::Ignored,
        };
        if remaining > 0 {
            return DamageOutcome::Absorbed { remaining };
        }

        let request = PlaceBlocksRequest::single(damage.instigator, pos, BlockId::AIR);
        match self.try_place_blocks(request) {
            Ok(_) => DamageOutcome::Destroyed,
            Err(error) => {
                warn!(
                    target: "world::damage",
                    %pos,
                    %error,
                    "block destruction was refused"
                );
                DamageOutcome::Cancelled
            }
        }
    }

    /// Advances the clock by `delta_ms` and dispatches every delayed action
    /// that came due, in fire order.
    ///
    /// Actions whose actor died in the meantime are skipped. Delivery stops
    /// early for an action whose actor is destroyed by a handler mid-chain.
    pub fn advance(&mut self, delta_ms: u64) -> TimeMs {
        let now = self.clock.advance(delta_ms);
        for action in self.schedule.take_due(now) {
            if !self.entities.is_alive(action.actor) {
                debug!(
                    target: "world::schedule",
                    actor = %action.actor,
                    action_id = %action.action_id,
                    "skipping delayed action for a dead actor"
                );
                continue;
            }
            for handler in self.hub.delayed_handlers() {
                if !self.entities.is_alive(action.actor) {
                    break;
                }
                handler.on_delayed_action(self, &action);
            }
        }
        now
    }

    pub(crate) fn notify_before_block_moves(&mut self, subject: EntityId) {
        for listener in self.hub.move_listeners() {
            listener.on_before_block_moves(self, subject);
        }
    }

    pub(crate) fn notify_move_transition(&mut self, transition: MoveTransition) {
        for listener in self.hub.move_listeners() {
            listener.on_move_transition(self, &transition);
        }
    }

    pub(crate) fn notify_move_finished(&mut self, subject: EntityId, success: bool) {
        for listener in self.hub.move_listeners() {
            listener.on_move_finished(self, subject, success);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::new(), BlockCatalog::new())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::block::BlockFlags;
    use crate::event::{DamageGuard, DelayedActionHandler, PlacementGuard, PlacementObserver};
    use crate::schedule::DelayedAction;

    fn create_test_world() -> (World, BlockId) {
        let mut catalog = BlockCatalog::new();
        let stone = catalog
            .register(
                BlockDef::new("stone", BlockFlags::empty())
                    .with_durability(10)
                    .with_template("core:stone_block"),
            )
            .unwrap();
        (World::new(WorldConfig::new(), catalog), stone)
    }

    struct VetoAll;

    impl PlacementGuard for VetoAll {
        fn name(&self) -> &'static str {
            "veto_all"
        }

        fn inspect(&self, _world: &World, _request: &PlaceBlocksRequest) -> PlacementVerdict {
            PlacementVerdict::Veto
        }
    }

    struct CancelAll;

    impl DamageGuard for CancelAll {
        fn name(&self) -> &'static str {
            "cancel_all"
        }

        fn before_block_damage(&self, _world: &World, _damage: &BlockDamage) -> DamageVerdict {
            DamageVerdict::Cancel
        }
    }

    #[test]
    fn place_commits_and_reports_changes() {
        let (mut world, stone) = create_test_world();
        let pos = CellPos::new(1, 0, 0);

        let placed = world
            .try_place_blocks(PlaceBlocksRequest::single(EntityId(9), pos, stone))
            .unwrap();

        assert_eq!(placed.issuer, EntityId(9));
        assert_eq!(
            placed.changes,
            [CellChange {
                pos,
                previous: BlockId::AIR,
                block: stone,
            }]
        );
        assert_eq!(world.block_at(pos), stone);
    }

    #[test]
    fn rejects_empty_and_oversized_batches() {
        let (mut world, stone) = create_test_world();

        let empty = world.try_place_blocks(PlaceBlocksRequest::new(EntityId(1)));
        assert_eq!(empty, Err(PlaceError::EmptyBatch));

        let mut oversized = PlaceBlocksRequest::new(EntityId(1));
        for x in 0..(WorldConfig::MAX_CELLS_PER_BATCH as i32 + 1) {
            oversized = oversized.assign(CellPos::new(x, 0, 0), stone);
        }
        assert!(matches!(
            world.try_place_blocks(oversized),
            Err(PlaceError::BatchTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_unknown_blocks() {
        let (mut world, _) = create_test_world();

        let result = world.try_place_blocks(PlaceBlocksRequest::single(
            EntityId(1),
            CellPos::ORIGIN,
            BlockId(999),
        ));
        assert_eq!(result, Err(PlaceError::UnknownBlock(BlockId(999))));
    }

    #[test]
    fn veto_rejects_the_whole_batch() {
        let (mut world, stone) = create_test_world();
        world.hub_mut().register_placement_guard(Arc::new(VetoAll));

        let request = PlaceBlocksRequest::new(EntityId(1))
            .assign(CellPos::new(0, 0, 0), stone)
            .assign(CellPos::new(1, 0, 0), stone);
        assert_eq!(world.try_place_blocks(request), Err(PlaceError::Vetoed));

        assert_eq!(world.block_at(CellPos::new(0, 0, 0)), BlockId::AIR);
        assert_eq!(world.block_at(CellPos::new(1, 0, 0)), BlockId::AIR);
    }

    struct RecordingObserver {
        seen: Arc<Mutex<Vec<BlockId>>>,
    }

    impl PlacementObserver for RecordingObserver {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn on_blocks_placed(&self, world: &mut World, placed: &PlacedBlocks) {
            // The receipt arrives after commit, so reads see the new state.
            for change in &placed.changes {
                self.seen.lock().unwrap().push(world.block_at(change.pos));
            }
        }
    }

    #[test]
    fn observers_run_against_the_committed_state() {
        let (mut world, stone) = create_test_world();
        let seen = Arc::new(Mutex::new(Vec::new()));
        world
            .hub_mut()
            .register_placement_observer(Arc::new(RecordingObserver { seen: seen.clone() }));

        world
            .try_place_blocks(PlaceBlocksRequest::single(EntityId(1), CellPos::ORIGIN, stone))
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), [stone]);
    }

    #[test]
    fn block_entity_binds_lazily_and_follows_mutation() {
        let (mut world, stone) = create_test_world();
        let pos = CellPos::new(2, 3, 4);
        world
            .try_place_blocks(PlaceBlocksRequest::single(EntityId(1), pos, stone))
            .unwrap();

        let entity = world.block_entity_at(pos);
        assert_eq!(world.block_entity_at(pos), entity);

        let record = world.entities().record(entity).unwrap();
        assert_eq!(record.template.as_deref(), Some("core:stone_block"));
        assert_eq!(record.location, Some(pos));
        assert_eq!(record.durability, Some(ResourceMeter::full(10)));

        // Overwriting the cell retires the binding.
        world
            .try_place_blocks(PlaceBlocksRequest::single(EntityId(1), pos, BlockId::AIR))
            .unwrap();
        assert!(!world.entities().is_alive(entity));
        assert_ne!(world.block_entity_at(pos), entity);
    }

    #[test]
    fn damage_absorbs_then_destroys() {
        let (mut world, stone) = create_test_world();
        let pos = CellPos::ORIGIN;
        world
            .try_place_blocks(PlaceBlocksRequest::single(EntityId(1), pos, stone))
            .unwrap();
        let target = world.block_entity_at(pos);

        let first = world.deal_block_damage(BlockDamage::new(EntityId(1), target, 4));
        assert_eq!(first, DamageOutcome::Absorbed { remaining: 6 });

        let second = world.deal_block_damage(BlockDamage::new(EntityId(1), target, 6));
        assert_eq!(second, DamageOutcome::Destroyed);
        assert_eq!(world.block_at(pos), BlockId::AIR);
        assert!(!world.entities().is_alive(target));
    }

    #[test]
    fn damage_guard_cancels_before_any_effect() {
        let (mut world, stone) = create_test_world();
        let pos = CellPos::ORIGIN;
        world
            .try_place_blocks(PlaceBlocksRequest::single(EntityId(1), pos, stone))
            .unwrap();
        let target = world.block_entity_at(pos);
        world.hub_mut().register_damage_guard(Arc::new(CancelAll));

        let outcome = world.deal_block_damage(BlockDamage::new(EntityId(1), target, 100));
        assert_eq!(outcome, DamageOutcome::Cancelled);

        let meter = world.entities().record(target).unwrap().durability.unwrap();
        assert_eq!(meter.current, 10);
        assert_eq!(world.block_at(pos), stone);
    }

    #[test]
    fn damage_on_indestructible_blocks_is_ignored() {
        let (mut world, _) = create_test_world();
        let bedrock = world
            .catalog_mut()
            .register(BlockDef::new("bedrock", BlockFlags::INDESTRUCTIBLE))
            .unwrap();
        let pos = CellPos::ORIGIN;
        world
            .try_place_blocks(PlaceBlocksRequest::single(EntityId(1), pos, bedrock))
            .unwrap();
        let target = world.block_entity_at(pos);

        let outcome = world.deal_block_damage(BlockDamage::new(EntityId(1), target, 1_000));
        assert_eq!(outcome, DamageOutcome::Ignored);
        assert_eq!(world.block_at(pos), bedrock);
    }

    struct RecordingHandler {
        fired: Arc<Mutex<Vec<String>>>,
    }

    impl DelayedActionHandler for RecordingHandler {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn on_delayed_action(&self, _world: &mut World, action: &DelayedAction) {
            self.fired.lock().unwrap().push(action.action_id.clone());
        }
    }

    #[test]
    fn advance_dispatches_due_actions_and_skips_dead_actors() {
        let (mut world, _) = create_test_world();
        let fired = Arc::new(Mutex::new(Vec::new()));
        world
            .hub_mut()
            .register_delayed_handler(Arc::new(RecordingHandler {
                fired: fired.clone(),
            }));

        let alive = world.entities_mut().create();
        let doomed = world.entities_mut().create();
        world.schedule_mut().schedule(alive, "keep", TimeMs(100));
        world.schedule_mut().schedule(doomed, "drop", TimeMs(150));
        world.entities_mut().destroy(doomed);

        assert_eq!(world.advance(200), TimeMs(200));
        assert_eq!(*fired.lock().unwrap(), ["keep"]);
        assert!(world.schedule().is_empty());
    }
}
