//! Academy Recruit: a drilled soldier with longer stride and no tricks.

use crate::board::StepOffset;
use crate::pieces::behavior::PieceBehavior;

pub struct AcademyRecruit;

impl PieceBehavior for AcademyRecruit {
    fn movement_pattern(&self, offset: StepOffset) -> bool {
        offset.is_orthogonal_up_to(2)
    }
}
