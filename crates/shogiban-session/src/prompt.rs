use shogiban_core::Move;

/// Modal yes/no question asked when a move may promote but need not.
///
/// Called synchronously; the session waits for the answer before the move
/// is played.
pub trait PromotionPrompt {
    /// `mv` is the promoting form of the move; `true` plays it
    fn confirm_promotion(&mut self, mv: Move) -> bool;
}

impl<F> PromotionPrompt for F
where
    F: FnMut(Move) -> bool,
{
    fn confirm_promotion(&mut self, mv: Move) -> bool {
        self(mv)
    }
}
