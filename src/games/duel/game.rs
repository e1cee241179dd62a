//! Duel rules implementation.

use tracing::{debug, trace};

use crate::cards::{CardDefinition, CardKind, CardRegistry};
use crate::core::{
    DamageTarget, EntityId, EnvConfig, GameState, Move, MoveRecord, Phase, PlayerId, ZoneId,
};
use crate::decks::Decklist;
use crate::rules::{Engine, EngineError, PlayerView};
use crate::stack::{PassOutcome, PriorityStack, StackEntry};

/// Hand limits taken from the environment config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HandRules {
    opening_hand_size: usize,
    max_hand_size: usize,
}

/// A two-seat tap-land duel.
///
/// Built with [`Engine::new_game`], then [`Engine::start_game`] shuffles
/// both libraries, deals opening hands, and gives seat 0 priority in its
/// first main phase.
#[derive(Clone, Debug)]
pub struct Duel {
    registry: CardRegistry,
    hand_rules: HandRules,
    state: GameState,
    stack: PriorityStack,
    started: bool,
}

impl Duel {
    /// Read access to the full state.
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn stack(&self) -> &PriorityStack {
        &self.stack
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    fn definition(&self, entity: EntityId) -> Option<&CardDefinition> {
        let card = self.state.card(entity)?;
        self.registry.get(card.card_id)
    }

    fn name(&self, entity: EntityId) -> String {
        self.definition(entity)
            .map_or_else(|| format!("unknown {entity}"), |d| d.name.clone())
    }

    fn is_creature(&self, entity: EntityId) -> bool {
        self.definition(entity).is_some_and(CardDefinition::is_creature)
    }

    fn power(&self, entity: EntityId) -> i32 {
        self.definition(entity).and_then(CardDefinition::stats).map_or(0, |(p, _)| p)
    }

    fn on_battlefield(&self, entity: EntityId) -> bool {
        self.state.zones.is_in(entity, ZoneId::Battlefield)
    }

    fn untapped_lands(&self, player: PlayerId) -> Vec<EntityId> {
        self.state
            .permanents(player)
            .filter(|c| !c.tapped)
            .filter(|c| self.registry.get(c.card_id).is_some_and(CardDefinition::is_land))
            .map(|c| c.entity_id)
            .collect()
    }

    /// Creatures on the battlefield, in arrival order.
    fn creatures(&self) -> Vec<EntityId> {
        self.state
            .zones
            .cards(ZoneId::Battlefield)
            .filter(|&e| self.is_creature(e))
            .collect()
    }

    fn creatures_of(&self, player: PlayerId) -> Vec<EntityId> {
        self.creatures()
            .into_iter()
            .filter(|&e| self.state.card(e).is_some_and(|c| c.owner == player))
            .collect()
    }

    /// Both seats, then every creature on the battlefield.
    pub fn damage_targets(&self) -> Vec<DamageTarget> {
        PlayerId::both()
            .map(DamageTarget::Player)
            .chain(self.creatures().into_iter().map(DamageTarget::Creature))
            .collect()
    }

    fn can_attack(&self, creature: EntityId) -> bool {
        self.state
            .card(creature)
            .is_some_and(|c| !c.tapped && !c.summoning_sick)
            && !self.state.combat.is_attacking(creature)
    }

    fn can_block(&self, creature: EntityId) -> bool {
        self.state.card(creature).is_some_and(|c| !c.tapped) && !self.state.combat.is_blocking(creature)
    }

    // === Move enumeration ===

    fn priority_moves(&self, player: PlayerId, moves: &mut Vec<Move>) {
        let sorcery_speed =
            self.state.phase.is_main() && player == self.state.active_player && self.stack.is_empty();
        let mana = self.untapped_lands(player).len();
        let hand: Vec<EntityId> = self.state.zones.cards(ZoneId::Hand(player)).collect();

        if sorcery_speed && !self.state.players[player].land_played {
            for &card in &hand {
                if self.definition(card).is_some_and(CardDefinition::is_land) {
                    moves.push(Move::PlayLand(card));
                }
            }
        }

        let targets = self.damage_targets();
        for &card in &hand {
            let Some(def) = self.definition(card) else {
                continue;
            };
            if def.is_land() || def.cost as usize > mana || !(def.is_instant() || sorcery_speed) {
                continue;
            }
            if def.needs_target() {
                moves.extend(targets.iter().map(|&t| Move::Cast {
                    card,
                    target: Some(t),
                }));
            } else {
                moves.push(Move::Cast { card, target: None });
            }
        }
    }

    fn attack_moves(&self, player: PlayerId, moves: &mut Vec<Move>) {
        for creature in self.creatures_of(player) {
            if self.can_attack(creature) {
                moves.push(Move::Attack(creature));
            }
        }
    }

    fn block_moves(&self, player: PlayerId, moves: &mut Vec<Move>) {
        let open_attackers: Vec<EntityId> = self
            .state
            .combat
            .attackers
            .iter()
            .copied()
            .filter(|&a| self.on_battlefield(a) && self.state.combat.blocker_of(a).is_none())
            .collect();

        for blocker in self.creatures_of(player) {
            if !self.can_block(blocker) {
                continue;
            }
            for &attacker in &open_attackers {
                moves.push(Move::Block { blocker, attacker });
            }
        }
    }

    // === Move execution ===

    fn pass(&mut self) {
        match self.state.phase {
            Phase::DeclareAttackers | Phase::DeclareBlockers => self.advance_phase(),
            _ => match self.stack.pass() {
                PassOutcome::Continue => {}
                PassOutcome::AllPassed if self.stack.is_empty() => self.advance_phase(),
                PassOutcome::AllPassed => {
                    self.resolve_top();
                    self.stack.give_priority(self.state.active_player);
                }
            },
        }
    }

    fn cast(&mut self, player: PlayerId, card: EntityId, target: Option<DamageTarget>) {
        let cost = self.definition(card).map_or(0, |d| d.cost as usize);
        for land in self.untapped_lands(player).into_iter().take(cost) {
            if let Some(c) = self.state.card_mut(land) {
                c.tapped = true;
            }
        }
        self.state.move_card(card, ZoneId::Stack);
        self.stack.push(StackEntry {
            card,
            controller: player,
            target,
        });
    }

    fn resolve_top(&mut self) {
        let Some(entry) = self.stack.pop() else {
            return;
        };
        let Some(kind) = self.definition(entry.card).map(|d| d.kind) else {
            return;
        };
        trace!(card = %entry.card, controller = %entry.controller, "resolving");

        match kind {
            CardKind::Creature { .. } => {
                self.state.move_card(entry.card, ZoneId::Battlefield);
                if let Some(c) = self.state.card_mut(entry.card) {
                    c.summoning_sick = true;
                }
                return;
            }
            CardKind::Burn { damage } => {
                if let Some(target) = entry.target {
                    self.deal_damage(target, damage);
                }
            }
            CardKind::Lifegain { amount } => {
                self.state.players[entry.controller].life += amount;
            }
            CardKind::Sweep { damage } => {
                for target in self.damage_targets() {
                    self.deal_damage(target, damage);
                }
            }
            CardKind::Land => {}
        }

        if let Some(owner) = self.state.card(entry.card).map(|c| c.owner) {
            self.state.move_card(entry.card, ZoneId::Graveyard(owner));
        }
    }

    fn deal_damage(&mut self, target: DamageTarget, amount: i32) {
        match target {
            DamageTarget::Player(p) => self.state.players[p].life -= amount,
            DamageTarget::Creature(e) => {
                if self.on_battlefield(e) {
                    if let Some(c) = self.state.card_mut(e) {
                        c.damage += amount;
                    }
                }
            }
        }
    }

    fn combat_damage(&mut self) {
        let defender = self.state.active_player.opponent();
        let mut assignments = Vec::new();

        for &attacker in &self.state.combat.attackers {
            if !self.on_battlefield(attacker) {
                continue;
            }
            let power = self.power(attacker);
            match self
                .state
                .combat
                .blocker_of(attacker)
                .filter(|&b| self.on_battlefield(b))
            {
                Some(blocker) => {
                    assignments.push((DamageTarget::Creature(blocker), power));
                    assignments.push((DamageTarget::Creature(attacker), self.power(blocker)));
                }
                None => assignments.push((DamageTarget::Player(defender), power)),
            }
        }

        for (target, amount) in assignments {
            self.deal_damage(target, amount);
        }
    }

    fn check_state_based_actions(&mut self) {
        let dead: Vec<(EntityId, PlayerId)> = self
            .creatures()
            .into_iter()
            .filter_map(|e| {
                let card = self.state.card(e)?;
                let (_, toughness) = self.registry.get(card.card_id)?.stats()?;
                (card.damage >= toughness).then_some((e, card.owner))
            })
            .collect();

        for (creature, owner) in dead {
            trace!(creature = %creature, "creature dies");
            self.state.move_card(creature, ZoneId::Graveyard(owner));
        }

        for p in PlayerId::both() {
            let record = &mut self.state.players[p];
            if record.life <= 0 && !record.has_lost {
                record.has_lost = true;
                debug!(player = %p, life = record.life, "player lost");
            }
        }
    }

    // === Turn structure ===

    /// Move through automatic steps until a seat must decide or the game ends.
    fn advance_phase(&mut self) {
        let mut phase = self.state.phase;
        loop {
            if phase == Phase::Cleanup {
                self.state.advance_turn();
            }
            phase = phase.next();
            if self.enter_phase(phase) {
                return;
            }
        }
    }

    /// Returns true when the phase stops for a decision or the game is over.
    fn enter_phase(&mut self, phase: Phase) -> bool {
        self.state.phase = phase;
        trace!(turn = self.state.turn_number, phase = %phase, "entering phase");
        self.run_turn_based_actions(phase);
        self.check_state_based_actions();

        if self.is_over() {
            return true;
        }
        match self.decider(phase) {
            Some(player) => {
                self.stack.give_priority(player);
                true
            }
            None => false,
        }
    }

    fn run_turn_based_actions(&mut self, phase: Phase) {
        let active = self.state.active_player;
        match phase {
            Phase::Untap => {
                let ids: Vec<EntityId> = self.state.permanents(active).map(|c| c.entity_id).collect();
                for id in ids {
                    if let Some(c) = self.state.card_mut(id) {
                        c.tapped = false;
                        c.summoning_sick = false;
                    }
                }
            }
            Phase::Draw if self.state.turn_number > 1 => {
                if self.state.draw(active).is_none() {
                    debug!(player = %active, "drew from an empty library");
                    self.state.players[active].has_lost = true;
                }
            }
            Phase::CombatDamage => self.combat_damage(),
            Phase::Cleanup => {
                while self.state.zones.size(ZoneId::Hand(active)) > self.hand_rules.max_hand_size {
                    let Some(card) = self.state.zones.top(ZoneId::Hand(active)) else {
                        break;
                    };
                    self.state.move_card(card, ZoneId::Graveyard(active));
                }
                for creature in self.creatures() {
                    if let Some(c) = self.state.card_mut(creature) {
                        c.damage = 0;
                    }
                }
            }
            _ => {}
        }
    }

    /// Seat that decides in `phase`, or `None` when the phase runs itself.
    fn decider(&self, phase: Phase) -> Option<PlayerId> {
        let active = self.state.active_player;
        match phase {
            Phase::PrecombatMain | Phase::PostcombatMain | Phase::End => Some(active),
            Phase::DeclareAttackers => self
                .creatures_of(active)
                .into_iter()
                .any(|c| self.can_attack(c))
                .then_some(active),
            Phase::DeclareBlockers => {
                let defender = active.opponent();
                let blockable = !self.state.combat.attackers.is_empty()
                    && self.creatures_of(defender).into_iter().any(|b| self.can_block(b));
                blockable.then_some(defender)
            }
            _ => None,
        }
    }
}

impl Engine for Duel {
    fn new_game(
        gold: &Decklist,
        silver: &Decklist,
        registry: &CardRegistry,
        config: &EnvConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let mut state = GameState::new(config.starting_life, seed);

        for (player, list) in [(PlayerId::FIRST, gold), (PlayerId::SECOND, silver)] {
            if list.is_empty() {
                return Err(EngineError::EmptyDeck(list.name.clone()));
            }
            for card in list.cards() {
                if !registry.contains(card) {
                    return Err(EngineError::UnknownCard(card));
                }
                state.create_card(card, player, ZoneId::Library(player));
            }
        }

        Ok(Self {
            registry: registry.clone(),
            hand_rules: HandRules {
                opening_hand_size: config.opening_hand_size,
                max_hand_size: config.max_hand_size,
            },
            state,
            stack: PriorityStack::new(PlayerId::FIRST),
            started: false,
        })
    }

    fn start_game(&mut self) -> Result<(), EngineError> {
        if self.started {
            return Ok(());
        }

        for p in PlayerId::both() {
            let state = &mut self.state;
            state.zones.shuffle(ZoneId::Library(p), &mut state.rng);
        }
        for p in PlayerId::both() {
            for _ in 0..self.hand_rules.opening_hand_size {
                self.state.draw(p);
            }
        }

        self.started = true;
        debug!(seed = self.state.rng.seed(), "game started");
        if !self.enter_phase(Phase::Untap) {
            self.advance_phase();
        }
        Ok(())
    }

    fn priority_holder(&self) -> PlayerId {
        self.stack.holder()
    }

    fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        if !self.started || self.is_over() || player != self.stack.holder() {
            return Vec::new();
        }

        let mut moves = vec![Move::Pass];
        match self.state.phase {
            Phase::DeclareAttackers => self.attack_moves(player, &mut moves),
            Phase::DeclareBlockers => self.block_moves(player, &mut moves),
            _ => self.priority_moves(player, &mut moves),
        }
        moves
    }

    fn apply_move(&mut self, mv: Move, is_response: bool) -> Result<(), EngineError> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        let player = self.stack.holder();
        if !self.legal_moves(player).contains(&mv) {
            return Err(EngineError::IllegalMove { player, mv });
        }

        trace!(player = %player, mv = %mv, is_response, "applying move");
        self.state.history.push_back(MoveRecord {
            player,
            mv,
            is_response,
            turn: self.state.turn_number,
        });

        match mv {
            Move::Pass => self.pass(),
            Move::PlayLand(card) => {
                self.state.move_card(card, ZoneId::Battlefield);
                self.state.players[player].land_played = true;
                self.stack.give_priority(player);
            }
            Move::Cast { card, target } => self.cast(player, card, target),
            Move::Attack(creature) => {
                self.state.combat.attackers.push(creature);
                if let Some(c) = self.state.card_mut(creature) {
                    c.tapped = true;
                }
            }
            Move::Block { blocker, attacker } => self.state.combat.blocks.push((blocker, attacker)),
        }

        self.check_state_based_actions();
        Ok(())
    }

    fn state(&self, player: PlayerId) -> PlayerView {
        let names = |zone: ZoneId| -> Vec<String> {
            self.state.zones.cards(zone).map(|e| self.name(e)).collect()
        };
        let battlefield = self
            .state
            .permanents(player)
            .map(|c| {
                let label = self
                    .registry
                    .get(c.card_id)
                    .map_or_else(|| self.name(c.entity_id), |d| d.to_string());
                if c.tapped {
                    format!("{label} (tapped)")
                } else {
                    label
                }
            })
            .collect();

        PlayerView {
            player,
            life: self.life(player),
            has_lost: self.has_lost(player),
            is_active: self.state.active_player == player,
            has_priority: self.stack.holder() == player,
            phase: self.state.phase,
            hand: names(ZoneId::Hand(player)),
            library_size: self.library_size(player),
            graveyard: names(ZoneId::Graveyard(player)),
            battlefield,
        }
    }

    fn life(&self, player: PlayerId) -> i32 {
        self.state.players[player].life
    }

    fn has_lost(&self, player: PlayerId) -> bool {
        self.state.players[player].has_lost
    }

    fn hand_size(&self, player: PlayerId) -> usize {
        self.state.zones.size(ZoneId::Hand(player))
    }

    fn graveyard_size(&self, player: PlayerId) -> usize {
        self.state.zones.size(ZoneId::Graveyard(player))
    }

    fn library_size(&self, player: PlayerId) -> usize {
        self.state.zones.size(ZoneId::Library(player))
    }

    fn battlefield_size(&self) -> usize {
        self.state.zones.size(ZoneId::Battlefield)
    }

    fn attacker_count(&self) -> usize {
        self.state.combat.attackers.len()
    }

    fn blocker_count(&self) -> usize {
        self.state.combat.blocks.len()
    }

    fn damage_target_count(&self) -> usize {
        self.damage_targets().len()
    }

    fn stack_is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn active_player(&self) -> PlayerId {
        self.state.active_player
    }

    fn phase(&self) -> Phase {
        self.state.phase
    }
}
