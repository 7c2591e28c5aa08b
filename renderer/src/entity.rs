/// ----- INTERPOLATED ENTITY -----
/// One animated thing on screen (an elevator car or a person). Positions
/// move from source to target over a fixed frame window; the anchor is the
/// rendered position on the current frame.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct Entity {
    anchor: Position,
    source: Position,
    target: Position,
}

impl Entity {
    /// A new entity rests where it is created: source == target == anchor.
    pub fn at(position: Position) -> Self {
        Entity {
            anchor: position,
            source: position,
            target: position,
        }
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn target(&self) -> Position {
        self.target
    }

    /// Start a new interpolation span from the current anchor.
    pub fn retarget(&mut self, target: Position) {
        self.source = self.anchor;
        self.target = target;
    }

    /// Advance to frame `frame` of a `max_frame`-frame window. Direct
    /// interpolation from the span endpoints, so the final frame lands
    /// exactly on the target; the source commits there, ready for the next
    /// retarget.
    pub fn advance(&mut self, frame: u32, max_frame: u32) {
        let fraction = frame.min(max_frame) as f64 / max_frame as f64;
        self.anchor = Position {
            x: self.source.x + (self.target.x - self.source.x) * fraction,
            y: self.source.y + (self.target.y - self.source.y) * fraction,
        };
        if frame >= max_frame {
            self.source = self.anchor;
        }
    }
}
