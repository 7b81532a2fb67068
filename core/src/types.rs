use std::fmt;

/// Represents one of the two players.
/// White is the maximizing side, Black the minimizing side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index used for per-color arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the starting rank for pawns of this color.
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::Second,
            Color::Black => Rank::Seventh,
        }
    }

    /// Returns the promotion rank for pawns of this color.
    pub const fn promotion_rank(self) -> Rank {
        match self {
            Color::White => Rank::Eighth,
            Color::Black => Rank::First,
        }
    }

    /// Returns the rank the king and rooks start on.
    pub const fn home_rank(self) -> Rank {
        match self {
            Color::White => Rank::First,
            Color::Black => Rank::Eighth,
        }
    }

    /// Returns the direction pawns of this color move.
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Returns +1 for White and -1 for Black, the sign of a score in this side's favour.
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// The six types of chess pieces.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Pieces a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
    ];

    /// Returns the material weight used by the evaluators.
    pub const fn material_weight(self) -> i32 {
        match self {
            PieceType::Pawn => 2,
            PieceType::Knight => 6,
            PieceType::Bishop => 6,
            PieceType::Rook => 8,
            PieceType::Queen => 20,
            PieceType::King => 0,
        }
    }

    /// Returns true if this piece type slides along the given ray.
    pub const fn slides_along(self, ray: usize) -> bool {
        match self {
            PieceType::Bishop => ray % 2 == 1,
            PieceType::Rook => ray % 2 == 0,
            PieceType::Queen => true,
            _ => false,
        }
    }

    /// Returns the lowercase English name of the piece.
    pub const fn name(self) -> &'static str {
        match self {
            PieceType::Pawn => "pawn",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Rook => "rook",
            PieceType::Queen => "queen",
            PieceType::King => "king",
        }
    }

    /// Returns the lowercase FEN letter of the piece.
    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }
}

/// A chess piece with both type and color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    /// Creates a new piece with the given type and color.
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// Returns the FEN letter: uppercase for White, lowercase for Black.
    pub const fn to_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.piece_type.name())
    }
}

/// A file on the chess board (a-h).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct File(u8);

impl File {
    /// Creates a new file from index (0-7).
    /// Returns None if index is out of range.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(File(index))
        } else {
            None
        }
    }

    /// Creates a file from a character ('a'-'h').
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Returns the file as a character ('a'-'h').
    pub const fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Returns the file index (0-7).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the adjacent file in the given direction, if valid.
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let new_file = self.0 as i8 + delta;
        if new_file >= 0 && new_file < 8 {
            Some(File(new_file as u8))
        } else {
            None
        }
    }
}

/// File constants for readability.
#[allow(non_upper_case_globals)]
impl File {
    pub const A: File = File(0);
    pub const B: File = File(1);
    pub const C: File = File(2);
    pub const D: File = File(3);
    pub const E: File = File(4);
    pub const F: File = File(5);
    pub const G: File = File(6);
    pub const H: File = File(7);
}

/// A rank on the chess board (1-8).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(u8);

impl Rank {
    /// Creates a new rank from index (0-7).
    /// Returns None if index is out of range.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Rank(index))
        } else {
            None
        }
    }

    /// Creates a rank from a digit ('1'-'8').
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Rank(c as u8 - b'1')),
            _ => None,
        }
    }

    /// Returns the rank as a character ('1'-'8').
    pub const fn to_char(self) -> char {
        (b'1' + self.0) as char
    }

    /// Returns the rank index (0-7).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the adjacent rank in the given direction, if valid.
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let new_rank = self.0 as i8 + delta;
        if new_rank >= 0 && new_rank < 8 {
            Some(Rank(new_rank as u8))
        } else {
            None
        }
    }
}

/// Rank constants for readability.
#[allow(non_upper_case_globals)]
impl Rank {
    pub const First: Rank = Rank(0);
    pub const Second: Rank = Rank(1);
    pub const Third: Rank = Rank(2);
    pub const Fourth: Rank = Rank(3);
    pub const Fifth: Rank = Rank(4);
    pub const Sixth: Rank = Rank(5);
    pub const Seventh: Rank = Rank(6);
    pub const Eighth: Rank = Rank(7);
}

/// A square on the chess board, indexed rank-major (a1 = 0, h8 = 63).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a new square from file and rank.
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.0 * 8 + file.0)
    }

    /// Creates a square from index (0-63).
    /// Returns None if index is out of range.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses algebraic notation such as "e4".
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file = File::from_char(chars.next()?)?;
        let rank = Rank::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::new(file, rank))
    }

    /// Iterates over all 64 squares in rank-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Returns the file of this square.
    pub const fn file(self) -> File {
        File(self.0 % 8)
    }

    /// Returns the rank of this square.
    pub const fn rank(self) -> Rank {
        Rank(self.0 / 8)
    }

    /// Returns the square index (0-63).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the square displaced by the given file and rank deltas, if on the board.
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        match (self.file().offset(file_delta), self.rank().offset(rank_delta)) {
            (Some(file), Some(rank)) => Some(Square::new(file, rank)),
            _ => None,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}

/// Ray directions as (file, rank) deltas.
/// Even indices are orthogonal (rook, queen), odd indices diagonal (bishop, queen).
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Knight jumps as (file, rank) deltas.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];

/// The side of the board a castling move goes to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Wing {
    Kingside,
    Queenside,
}

impl Wing {
    /// File of the rook's starting corner.
    pub const fn rook_file(self) -> File {
        match self {
            Wing::Kingside => File::H,
            Wing::Queenside => File::A,
        }
    }

    /// File the king lands on after castling.
    pub const fn king_target(self) -> File {
        match self {
            Wing::Kingside => File::G,
            Wing::Queenside => File::C,
        }
    }

    /// File the rook lands on after castling.
    pub const fn rook_target(self) -> File {
        match self {
            Wing::Kingside => File::F,
            Wing::Queenside => File::D,
        }
    }

    /// Returns the wing whose rook starts on the given file, if any.
    pub const fn of_corner(file: File) -> Option<Wing> {
        match file.0 {
            0 => Some(Wing::Queenside),
            7 => Some(Wing::Kingside),
            _ => None,
        }
    }
}

impl fmt::Display for Wing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wing::Kingside => write!(f, "kingside"),
            Wing::Queenside => write!(f, "queenside"),
        }
    }
}

/// Castling status for one side.
///
/// Transitions only restrict freedom, except the explicit move to `Done`
/// made by castling itself. Once `Done`, the status never changes again.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CastlingStatus {
    /// Both wings still available (initial value).
    Realizable,
    /// Kingside castling is no longer possible.
    KingsideBlocked,
    /// Queenside castling is no longer possible.
    QueensideBlocked,
    /// Neither wing is possible.
    BothBlocked,
    /// The side has castled.
    Done,
}

impl CastlingStatus {
    /// Returns true if castling on the given wing is still permitted.
    pub const fn allows(self, wing: Wing) -> bool {
        match self {
            CastlingStatus::Realizable => true,
            CastlingStatus::KingsideBlocked => matches!(wing, Wing::Queenside),
            CastlingStatus::QueensideBlocked => matches!(wing, Wing::Kingside),
            CastlingStatus::BothBlocked | CastlingStatus::Done => false,
        }
    }

    /// Returns true if castling on either wing is still permitted.
    pub const fn any(self) -> bool {
        self.allows(Wing::Kingside) || self.allows(Wing::Queenside)
    }

    /// Forbids castling on one wing (a rook left its corner).
    pub const fn block(self, wing: Wing) -> Self {
        match (self, wing) {
            (CastlingStatus::Realizable, Wing::Kingside) => CastlingStatus::KingsideBlocked,
            (CastlingStatus::Realizable, Wing::Queenside) => CastlingStatus::QueensideBlocked,
            (CastlingStatus::KingsideBlocked, Wing::Queenside)
            | (CastlingStatus::QueensideBlocked, Wing::Kingside) => CastlingStatus::BothBlocked,
            (status, _) => status,
        }
    }

    /// Forbids castling on both wings (the king moved).
    pub const fn revoke(self) -> Self {
        match self {
            CastlingStatus::Done => CastlingStatus::Done,
            _ => CastlingStatus::BothBlocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }

    #[test]
    fn test_square_creation() {
        let e4 = Square::new(File::E, Rank::Fourth);
        assert_eq!(e4.index(), 28);
        assert_eq!(format!("{}", e4), "e4");
        assert_eq!(Square::parse("e4"), Some(e4));
        assert_eq!(Square::parse("i4"), None);
        assert_eq!(Square::parse("e44"), None);
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let a1 = Square::new(File::A, Rank::First);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(1, 2), Square::parse("b3"));
    }

    #[test]
    fn test_ray_parity() {
        for (ray, &(df, dr)) in DIRECTIONS.iter().enumerate() {
            let diagonal = df != 0 && dr != 0;
            assert_eq!(ray % 2 == 1, diagonal);
            assert_eq!(PieceType::Bishop.slides_along(ray), diagonal);
            assert_eq!(PieceType::Rook.slides_along(ray), !diagonal);
            assert!(PieceType::Queen.slides_along(ray));
        }
    }

    #[test]
    fn test_castling_block_transitions() {
        use CastlingStatus::*;
        assert_eq!(Realizable.block(Wing::Kingside), KingsideBlocked);
        assert_eq!(Realizable.block(Wing::Queenside), QueensideBlocked);
        assert_eq!(KingsideBlocked.block(Wing::Queenside), BothBlocked);
        assert_eq!(KingsideBlocked.block(Wing::Kingside), KingsideBlocked);
        assert_eq!(QueensideBlocked.block(Wing::Kingside), BothBlocked);
        assert_eq!(Done.block(Wing::Kingside), Done);
        assert_eq!(Realizable.revoke(), BothBlocked);
        assert_eq!(Done.revoke(), Done);
    }

    #[test]
    fn test_castling_allows() {
        use CastlingStatus::*;
        assert!(Realizable.allows(Wing::Kingside) && Realizable.allows(Wing::Queenside));
        assert!(!KingsideBlocked.allows(Wing::Kingside));
        assert!(KingsideBlocked.allows(Wing::Queenside));
        assert!(QueensideBlocked.allows(Wing::Kingside));
        assert!(!BothBlocked.any());
        assert!(!Done.any());
    }
}
