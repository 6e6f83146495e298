use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Setup -> Playing (first move)
/// - Setup/Playing -> Flowing (connected board, flow started)
/// - Playing -> Failed (placement tried with no moves left on a disconnected board)
/// - Failed -> Playing (retry, board kept)
/// - Flowing -> Success (animation finished)
/// - Success -> Setup (next level) or LevelComplete (no levels left)
/// - any but LevelComplete -> Setup (reset)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Level freshly generated, nothing moved yet
    #[default]
    Setup,
    /// Player is editing the board
    Playing,
    /// Path confirmed, flow is being animated
    Flowing,
    /// Level finished and scored
    Success,
    /// Out of moves without a connection
    Failed,
    /// Every level of the catalog has been finished
    LevelComplete,
}

impl SessionState {
    /// Whether the board accepts place, remove and rotate commands
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Setup | Self::Playing)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Success | Self::Failed | Self::LevelComplete)
    }
}

/// Result of asking to start the flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowStart {
    /// The board connects; the path is animated from here on.
    Started(FlowPath),
    /// Not connected yet, nothing changed.
    NotConnected(FlowBreak),
}

/// Flow path being revealed one cell at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowAnimation {
    path: FlowPath,
    progress: usize,
}

impl FlowAnimation {
    pub fn new(path: FlowPath) -> Self {
        Self { path, progress: 0 }
    }

    /// Cells already filled by the flow.
    pub fn filled(&self) -> &[Coord2] {
        &self.path.cells()[..self.progress]
    }

    pub fn path(&self) -> &FlowPath {
        &self.path
    }

    pub fn is_done(&self) -> bool {
        self.progress >= self.path.len()
    }
}

impl Iterator for FlowAnimation {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.path.cells().get(self.progress).copied()?;
        self.progress += 1;
        Some(cell)
    }
}

/// A run through the level catalog, from the first level to the last.
#[derive(Clone, Debug)]
pub struct Session<G = RandomLevelGenerator> {
    catalog: LevelCatalog,
    scoring: ScoringRules,
    generator: G,
    level_index: usize,
    score: u32,
    stars: u32,
    state: SessionState,
    engine: PlayEngine,
    flow: Option<FlowAnimation>,
}

impl Session<RandomLevelGenerator> {
    /// Session on the first level, with boards drawn from `seed`.
    pub fn new(catalog: LevelCatalog, seed: u64) -> Result<Self> {
        Self::with_generator(catalog, ScoringRules::default(), RandomLevelGenerator::new(seed))
    }
}

impl<G: LevelGenerator> Session<G> {
    pub fn with_generator(catalog: LevelCatalog, scoring: ScoringRules, mut generator: G) -> Result<Self> {
        let first = catalog.get(0).ok_or(GameError::InvalidLevel)?;
        let engine = generator.generate(first)?;
        log::debug!("Session started on level {:?}", first.name);
        Ok(Self {
            catalog,
            scoring,
            generator,
            level_index: 0,
            score: 0,
            stars: 0,
            state: SessionState::Setup,
            engine,
            flow: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> &LevelConfig {
        // level_index only ever holds indices checked against the catalog
        &self.catalog.levels()[self.level_index]
    }

    pub fn level_name(&self) -> &str {
        &self.level().name
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    pub fn moves_left(&self) -> CellCount {
        self.engine.moves_left()
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn inventory(&self) -> &Inventory {
        self.engine.inventory()
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn flow(&self) -> Option<&FlowAnimation> {
        self.flow.as_ref()
    }

    /// Cells the flow has filled so far, empty outside of a flow.
    pub fn flow_progress(&self) -> &[Coord2] {
        self.flow.as_ref().map_or(&[][..], FlowAnimation::filled)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_session(self)
    }

    /// Jumps to the setup of any level of the catalog.
    pub fn new_level(&mut self, index: usize) -> Result<()> {
        self.setup_level(index)
    }

    /// Fresh board for the same level; score and level are kept.
    pub fn reset(&mut self) -> Result<()> {
        if matches!(self.state, SessionState::LevelComplete) {
            return Err(GameError::InvalidState);
        }
        if self.flow.is_some() {
            log::debug!("Flow aborted by reset");
        }
        self.setup_level(self.level_index)
    }

    /// Back to the first level with score and stars cleared.
    pub fn restart_game(&mut self) -> Result<()> {
        self.score = 0;
        self.stars = 0;
        self.new_level(0)
    }

    /// Moves on after a completed level.
    pub fn next_level(&mut self) -> Result<()> {
        if !matches!(self.state, SessionState::Success) {
            return Err(GameError::InvalidState);
        }
        let next = self.level_index + 1;
        if next >= self.catalog.len() {
            log::debug!("All {} levels complete, final score {}", self.catalog.len(), self.score);
            self.state = SessionState::LevelComplete;
            return Ok(());
        }
        self.new_level(next)
    }

    /// Spends a move on a placement. Trying to place with the budget spent
    /// while the board is still disconnected fails the level.
    pub fn place(&mut self, id: ItemId, coords: Coord2) -> Result<PipeType> {
        self.check_editable()?;
        match self.engine.place(id, coords) {
            Ok(pipe) => {
                self.state = SessionState::Playing;
                Ok(pipe)
            }
            Err(err @ GameError::InvalidPlacement(PlacementError::NoMovesLeft)) => {
                if !self.engine.trace().is_connected() {
                    log::debug!("Out of moves on level {}", self.level_index);
                    self.state = SessionState::Failed;
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Leaves a failed level with its board as it is, so pipes can still be
    /// turned or taken back.
    pub fn retry(&mut self) -> Result<()> {
        if !matches!(self.state, SessionState::Failed) {
            return Err(GameError::InvalidState);
        }
        self.state = SessionState::Playing;
        Ok(())
    }

    pub fn remove(&mut self, coords: Coord2) -> Result<ItemId> {
        self.check_editable()?;
        let id = self.engine.remove(coords)?;
        self.state = SessionState::Playing;
        Ok(id)
    }

    pub fn rotate(&mut self, coords: Coord2) -> Result<PipeType> {
        self.check_editable()?;
        let pipe = self.engine.rotate_at(coords)?;
        self.state = SessionState::Playing;
        Ok(pipe)
    }

    /// Turns a piece that is still in the inventory.
    pub fn rotate_item(&mut self, id: ItemId) -> Result<PipeType> {
        self.check_editable()?;
        self.engine.rotate_item(id)
    }

    pub fn hint(&self) -> Result<Hint> {
        if !self.state.is_editable() {
            return Err(GameError::InvalidState);
        }
        Ok(self.engine.hint())
    }

    /// Decides the level on the spot; only a connected board starts flowing.
    pub fn start_flow(&mut self) -> Result<FlowStart> {
        self.check_editable()?;

        match self.engine.trace() {
            FlowTrace::Connected(path) => {
                log::debug!("Flow started on level {} over {} cells", self.level_index, path.len());
                self.engine.set_flow_active(true);
                self.flow = Some(FlowAnimation::new(path.clone()));
                self.state = SessionState::Flowing;
                Ok(FlowStart::Started(path))
            }
            FlowTrace::Broken(flow_break) => {
                log::debug!("Flow not connected, stops at {:?}", flow_break.at);
                Ok(FlowStart::NotConnected(flow_break))
            }
        }
    }

    /// Fills the next cell of the flow; filling the last one completes the level.
    pub fn advance_flow(&mut self) -> Result<Coord2> {
        if !matches!(self.state, SessionState::Flowing) {
            return Err(GameError::InvalidState);
        }
        let flow = self.flow.as_mut().ok_or(GameError::InvalidState)?;
        let cell = flow.next().ok_or(GameError::InvalidState)?;
        if flow.is_done() {
            self.complete_level();
        }
        Ok(cell)
    }

    /// Skips the rest of the animation.
    pub fn finish_flow(&mut self) -> Result<()> {
        if !matches!(self.state, SessionState::Flowing) {
            return Err(GameError::InvalidState);
        }
        if let Some(flow) = self.flow.as_mut() {
            flow.by_ref().for_each(drop);
        }
        self.complete_level();
        Ok(())
    }

    fn complete_level(&mut self) {
        let moves_left = self.engine.moves_left();
        let points = self.scoring.score(moves_left);
        let stars = self.scoring.stars(moves_left, self.level().moves);

        self.engine.set_flow_active(false);
        self.score = self.score.saturating_add(points);
        self.stars += u32::from(stars);
        self.state = SessionState::Success;
        log::debug!(
            "Level {} complete with {} moves left: +{} points, {} stars",
            self.level_index,
            moves_left,
            points,
            stars
        );
    }

    /// Nothing changes unless the generator succeeds.
    fn setup_level(&mut self, index: usize) -> Result<()> {
        let level = self.catalog.get(index).ok_or(GameError::InvalidLevel)?;
        let engine = self.generator.generate(level)?;
        log::debug!("Set up level {} ({:?})", index, level.name);

        self.level_index = index;
        self.engine = engine;
        self.flow = None;
        self.state = SessionState::Setup;
        Ok(())
    }

    fn check_editable(&self) -> Result<()> {
        match self.state {
            state if state.is_editable() => Ok(()),
            state if state.is_final() => Err(GameError::InvalidState),
            _ => Err(PlacementError::FlowActive.into()),
        }
    }
}
