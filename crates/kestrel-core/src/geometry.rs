/// A two-dimensional extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl Size<u32> {
    /// True when either dimension is zero, e.g. a minimized window.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamp both dimensions to at least one pixel.
    ///
    /// Surfaces cannot be configured with a zero extent.
    pub fn at_least_one(self) -> Self {
        Size {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_detection() {
        assert!(Size::new(0u32, 600).is_empty());
        assert!(Size::new(800u32, 0).is_empty());
        assert!(!Size::new(800u32, 600).is_empty());
    }

    #[test]
    fn test_at_least_one() {
        assert_eq!(Size::new(0u32, 0).at_least_one(), Size::new(1, 1));
        assert_eq!(Size::new(800u32, 600).at_least_one(), Size::new(800, 600));
    }
}
