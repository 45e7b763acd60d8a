use crate::app::Model;

/// All possible events and actions in the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Advance one slide (stays on the last slide)
    NextSlide,
    /// Go back one slide (stays on the first slide)
    PrevSlide,
    /// Jump to the first slide
    FirstSlide,
    /// Jump to the last slide
    LastSlide,
    /// Terminal resized to (width, height)
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

/// Apply a message to the model and return the new state.
///
/// Navigation is O(1). A resize re-renders every slide, but only when the
/// width actually changed.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::NextSlide => model.next_slide(),
        Message::PrevSlide => model.prev_slide(),
        Message::FirstSlide => model.first_slide(),
        Message::LastSlide => model.last_slide(),
        Message::Resize(width, height) => model.resize(width, height),
        Message::Quit => model.should_quit = true,
    }
    model
}
