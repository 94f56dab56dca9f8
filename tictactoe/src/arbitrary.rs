use crate::{Board, Mark, Message, Move, Outcome};

impl quickcheck::Arbitrary for Mark {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Mark::X, Mark::O]).unwrap()
    }
}

impl quickcheck::Arbitrary for Move {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Move::new(u8::arbitrary(g) % 3, u8::arbitrary(g) % 3).unwrap()
    }
}

// Not necessarily a board that can be reached in a game: the number of
// x and o marks is independent.
impl quickcheck::Arbitrary for Board {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut board = Board::new();
        for mv in Move::all() {
            if let Some(&Some(mark)) = g.choose(&[None, Some(Mark::X), Some(Mark::O)]) {
                board.place(mark, mv).unwrap();
            }
        }
        board
    }
}

impl quickcheck::Arbitrary for Outcome {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Outcome::Win, Outcome::Lose, Outcome::Tie]).unwrap()
    }
}

impl quickcheck::Arbitrary for Message {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        match u8::arbitrary(g) % 8 {
            0 => Message::Hello,
            1 => Message::Mark(Mark::arbitrary(g)),
            2 => Message::MovePrompt,
            3 => Message::Move(Move::arbitrary(g)),
            4 => Message::Placed {
                mark: Mark::arbitrary(g),
                mv: Move::arbitrary(g),
            },
            5 => Message::Outcome(Outcome::arbitrary(g)),
            6 => Message::Rematch(bool::arbitrary(g)),
            _ => Message::Bye,
        }
    }
}
