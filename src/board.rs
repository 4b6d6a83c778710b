use crate::types::Position;

const BOARD_WIDTH: usize = 8;
const BOARD_HEIGHT: usize = 8;
const NUM_SQUARES: usize = BOARD_WIDTH * BOARD_HEIGHT;
const SIMPLE_LENGTH: i16 = 1;
const JUMP_LENGTH: i16 = 2;
const DIAGONAL_DIRECTIONS: [(i16, i16); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const STEP_LENGTHS: [i16; 2] = [SIMPLE_LENGTH, JUMP_LENGTH];

/// One of the two sides. An unoccupied square is `None` at the board
/// level, never a player variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Stable wire code used by the serde-facing types (1 or 2).
    pub fn code(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Vertical sign a man travels: One advances toward row 0.
    fn forward_sign(self) -> i16 {
        match self {
            Player::One => -1,
            Player::Two => 1,
        }
    }

    fn promotion_row(self) -> u8 {
        match self {
            Player::One => 0,
            Player::Two => (BOARD_HEIGHT - 1) as u8,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub player: Player,
    pub kind: PieceKind,
}

impl Piece {
    /// Icon code used by rendering collaborators, one per (player, kind).
    pub fn icon_code(self) -> u8 {
        match (self.player, self.kind) {
            (Player::One, PieceKind::Man) => 1,
            (Player::Two, PieceKind::Man) => 2,
            (Player::One, PieceKind::King) => 3,
            (Player::Two, PieceKind::King) => 4,
        }
    }
}

/// Outcome of classifying or validating a single step of a move path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Illegal,
    Simple,
    Jump,
}

/// Draughts board state: the grid, the per-side piece tallies and the
/// player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_WIDTH]; BOARD_HEIGHT],
    alive: [u8; 2],
    current_player: Player,
}

impl Board {
    /// Creates the initial board: the two middle rows empty, twelve men
    /// per side on the dark squares, Player One (bottom rows) to move.
    pub fn new() -> Self {
        let mut squares = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
        let mut alive = [0u8; 2];
        let middle_row = BOARD_HEIGHT / 2;

        for row in 0..BOARD_HEIGHT {
            if row == middle_row || row == middle_row - 1 {
                continue;
            }
            let player = if row > middle_row {
                Player::One
            } else {
                Player::Two
            };
            for col in 0..BOARD_WIDTH {
                if row % 2 == col % 2 {
                    continue;
                }
                squares[row][col] = Some(Piece {
                    player,
                    kind: PieceKind::Man,
                });
                alive[player.index()] += 1;
            }
        }

        Self {
            squares,
            alive,
            current_player: Player::One,
        }
    }

    /// Builds a board from explicit placements; tallies are derived from
    /// the placed pieces. Positions must be in range and distinct.
    pub fn from_pieces(pieces: &[(Position, Piece)], current_player: Player) -> Self {
        let mut board = Self {
            squares: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
            alive: [0u8; 2],
            current_player,
        };

        for &(pos, piece) in pieces {
            debug_assert!(Self::contains(pos), "placement out of bounds: {pos:?}");
            debug_assert!(board.square(pos).is_none(), "duplicate placement: {pos:?}");
            *board.square_mut(pos) = Some(piece);
            board.alive[piece.player.index()] += 1;
        }

        board
    }

    /// Returns the piece at `pos`, or `Ok(None)` for an empty square.
    ///
    /// Callers are expected to pre-validate coordinates; an out-of-range
    /// position is rejected with an error rather than a panic.
    pub fn piece_at(&self, pos: Position) -> Result<Option<Piece>, String> {
        if !Self::contains(pos) {
            return Err(format!(
                "position out of bounds: col {}, row {}",
                pos.col, pos.row
            ));
        }
        Ok(self.square(pos))
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn alive_count(&self, player: Player) -> u8 {
        self.alive[player.index()]
    }

    /// Validates a candidate step for the player to move against the
    /// live board. Out-of-range endpoints validate as `Step::Illegal`.
    pub fn validate_step(&self, from: Position, to: Position) -> Step {
        if !Self::contains(from) || !Self::contains(to) {
            return Step::Illegal;
        }

        let mover = match self.square(from) {
            Some(piece) if piece.player == self.current_player => piece,
            _ => return Step::Illegal,
        };
        if self.square(to).is_some() {
            return Step::Illegal;
        }

        match classify_step(from, to) {
            Step::Simple => {
                if mover.kind == PieceKind::King || self.is_forward(from, to) {
                    Step::Simple
                } else {
                    Step::Illegal
                }
            }
            // Jump direction is unrestricted for men and kings alike.
            Step::Jump => match self.square(midpoint(from, to)) {
                Some(piece) if piece.player != self.current_player => Step::Jump,
                _ => Step::Illegal,
            },
            Step::Illegal => Step::Illegal,
        }
    }

    /// Applies a full move path, then checks promotion at the final
    /// square and passes the turn to the opponent.
    ///
    /// The path runs on a scratch copy that is committed only when every
    /// step validates, so a rejected move leaves the board untouched.
    /// Captures made earlier in a jump chain are visible to validation
    /// of the later steps in the same path.
    pub fn apply_move(&mut self, path: &[Position]) -> bool {
        if path.len() < 2 {
            return false;
        }

        let mut next = *self;
        let mut last = path[0];
        if !Self::contains(last) || next.square(last).is_none() {
            return false;
        }

        for &current in &path[1..] {
            if current == last {
                continue;
            }
            let step = next.validate_step(last, current);
            if step == Step::Illegal {
                return false;
            }
            next.move_piece(last, current, step);
            last = current;
        }

        if next.is_promotion(last) {
            next.promote(last);
        }
        next.current_player = next.current_player.opponent();

        *self = next;
        true
    }

    /// True when the player to move has at least one validating step.
    pub fn has_any_legal_move(&self) -> bool {
        self.legal_steps_iter().next().is_some()
    }

    /// All validating single steps for the player to move, in scan order.
    pub fn legal_steps(&self) -> Vec<(Position, Position)> {
        self.legal_steps_iter().collect()
    }

    /// True when either side is out of pieces or the player to move has
    /// no legal step left.
    pub fn is_complete(&self) -> bool {
        self.alive_count(Player::One) == 0
            || self.alive_count(Player::Two) == 0
            || !self.has_any_legal_move()
    }

    /// Returns the winning side.
    /// Caller contract: only meaningful once `is_complete()` is true. A
    /// player stalemated with pieces remaining loses to the opponent.
    pub fn winner(&self) -> Player {
        if self.alive_count(Player::One) == 0 {
            Player::Two
        } else if self.alive_count(Player::Two) == 0 {
            Player::One
        } else {
            self.current_player.opponent()
        }
    }

    /// Converts the board to `[u8; 64]` icon codes (row-major):
    /// 0=empty, 1=P1 man, 2=P2 man, 3=P1 king, 4=P2 king.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            let pos = Position {
                col: (idx % BOARD_WIDTH) as u8,
                row: (idx / BOARD_WIDTH) as u8,
            };
            *cell = match self.square(pos) {
                Some(piece) => piece.icon_code(),
                None => 0,
            };
        }
        board
    }

    fn contains(pos: Position) -> bool {
        (pos.col as usize) < BOARD_WIDTH && (pos.row as usize) < BOARD_HEIGHT
    }

    fn square(&self, pos: Position) -> Option<Piece> {
        self.squares[usize::from(pos.row)][usize::from(pos.col)]
    }

    fn square_mut(&mut self, pos: Position) -> &mut Option<Piece> {
        &mut self.squares[usize::from(pos.row)][usize::from(pos.col)]
    }

    fn is_forward(&self, from: Position, to: Position) -> bool {
        let sign = (i16::from(to.row) - i16::from(from.row)).signum();
        sign == self.current_player.forward_sign()
    }

    fn move_piece(&mut self, from: Position, to: Position, step: Step) {
        let piece = self.square_mut(from).take();
        *self.square_mut(to) = piece;
        if step == Step::Jump {
            self.capture(from, to);
        }
    }

    fn capture(&mut self, from: Position, to: Position) {
        if let Some(piece) = self.square_mut(midpoint(from, to)).take() {
            self.alive[piece.player.index()] -= 1;
        }
    }

    fn is_promotion(&self, pos: Position) -> bool {
        match self.square(pos) {
            Some(piece) => {
                piece.kind != PieceKind::King && pos.row == piece.player.promotion_row()
            }
            None => false,
        }
    }

    fn promote(&mut self, pos: Position) {
        if let Some(piece) = self.square_mut(pos).as_mut() {
            piece.kind = PieceKind::King;
        }
    }

    // Exhaustive candidate enumeration: every square, four diagonal
    // directions, both step lengths, filtered through `validate_step` so
    // the search shares the exact rule logic of real moves.
    fn legal_steps_iter(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        all_positions()
            .flat_map(|from| {
                DIAGONAL_DIRECTIONS.into_iter().flat_map(move |direction| {
                    STEP_LENGTHS.into_iter().filter_map(move |length| {
                        diagonal_target(from, direction, length).map(|to| (from, to))
                    })
                })
            })
            .filter(move |&(from, to)| self.validate_step(from, to) != Step::Illegal)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifies a step geometrically from the absolute column and row
/// deltas: equal deltas of 1 are simple, of 2 are jumps, everything else
/// is illegal.
pub fn classify_step(from: Position, to: Position) -> Step {
    let difference_horizontal = (i16::from(from.col) - i16::from(to.col)).abs();
    let difference_vertical = (i16::from(from.row) - i16::from(to.row)).abs();

    if difference_horizontal != difference_vertical {
        Step::Illegal
    } else if difference_horizontal == SIMPLE_LENGTH {
        Step::Simple
    } else if difference_horizontal == JUMP_LENGTH {
        Step::Jump
    } else {
        Step::Illegal
    }
}

// Caller contract: the step between the endpoints is a jump, so the
// deltas are exactly 2 and the midpoint lands on the grid.
fn midpoint(from: Position, to: Position) -> Position {
    Position {
        col: (from.col + to.col) / 2,
        row: (from.row + to.row) / 2,
    }
}

fn diagonal_target(from: Position, direction: (i16, i16), length: i16) -> Option<Position> {
    let col = i16::from(from.col) + direction.0 * length;
    let row = i16::from(from.row) + direction.1 * length;
    if in_bounds(col, row) {
        Some(Position {
            col: col as u8,
            row: row as u8,
        })
    } else {
        None
    }
}

fn in_bounds(col: i16, row: i16) -> bool {
    (0..BOARD_WIDTH as i16).contains(&col) && (0..BOARD_HEIGHT as i16).contains(&row)
}

fn all_positions() -> impl Iterator<Item = Position> {
    (0..BOARD_HEIGHT as u8)
        .flat_map(|row| (0..BOARD_WIDTH as u8).map(move |col| Position { col, row }))
}
