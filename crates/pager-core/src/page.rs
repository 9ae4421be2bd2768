//! Page handles and page kinds.
//!
//! A [`PageHandle`] is the shared, identity-compared handle to one
//! materialized page. A [`PageKind`] is the factory registered under a reuse
//! identifier; it also answers whether an existing handle was produced by it
//! and can therefore be recycled for the same identifier.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use pager_geometry::{Rect, Size};

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Diagnostic identifier of a page object. Unique per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u64);

impl PageId {
    fn next() -> Self {
        Self(NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct PageInner {
    id: PageId,
    kind: TypeId,
    kind_name: &'static str,
    frame: Cell<Rect>,
    /// Frame of the nested content container, in page coordinates.
    content_frame: Cell<Rect>,
    attached: Cell<bool>,
    body: RefCell<Box<dyn Any>>,
}

/// Handle to a materialized page.
///
/// Cloning yields another handle to the same page. Equality is identity:
/// two handles are equal only if they point at the same page object.
#[derive(Clone)]
pub struct PageHandle {
    inner: Rc<PageInner>,
}

impl PageHandle {
    /// Wraps `body` in a new page sized to `bounds`.
    pub fn new<T: 'static>(body: T, bounds: Size) -> Self {
        Self::from_parts(
            TypeId::of::<T>(),
            std::any::type_name::<T>(),
            Box::new(body),
            bounds,
        )
    }

    fn from_parts(kind: TypeId, kind_name: &'static str, body: Box<dyn Any>, bounds: Size) -> Self {
        let frame = Rect::from_size(bounds);
        Self {
            inner: Rc::new(PageInner {
                id: PageId::next(),
                kind,
                kind_name,
                frame: Cell::new(frame),
                content_frame: Cell::new(Rect::from_size(frame.size())),
                attached: Cell::new(false),
                body: RefCell::new(body),
            }),
        }
    }

    pub fn id(&self) -> PageId {
        self.inner.id
    }

    /// Placement of the page inside the paged strip.
    pub fn frame(&self) -> Rect {
        self.inner.frame.get()
    }

    /// Frame of the nested content container. Always covers the page bounds.
    pub fn content_frame(&self) -> Rect {
        self.inner.content_frame.get()
    }

    /// Whether the page is currently attached to the host surface.
    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    /// Name of the body type, for logging.
    pub fn kind_name(&self) -> &'static str {
        self.inner.kind_name
    }

    /// Returns true if the page body is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.kind == TypeId::of::<T>()
    }

    /// Runs `f` against the body if it is a `T`.
    pub fn with_content<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let body = self.inner.body.borrow();
        body.downcast_ref::<T>().map(f)
    }

    /// Runs `f` against the mutable body if it is a `T`.
    ///
    /// Data sources use this to repopulate a recycled page.
    pub fn with_content_mut<T: 'static, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut body = self.inner.body.borrow_mut();
        body.downcast_mut::<T>().map(f)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &PageHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn kind_id(&self) -> TypeId {
        self.inner.kind
    }

    /// Moves the page and resizes its content container to the new bounds.
    pub(crate) fn set_frame(&self, frame: Rect) {
        self.inner.frame.set(frame);
        self.inner.content_frame.set(Rect::from_size(frame.size()));
    }

    pub(crate) fn set_attached(&self, attached: bool) {
        self.inner.attached.set(attached);
    }
}

impl PartialEq for PageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for PageHandle {}

impl fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageHandle")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind_name)
            .field("frame", &self.inner.frame.get())
            .field("attached", &self.inner.attached.get())
            .finish()
    }
}

/// Reuse descriptor registered under an identifier.
///
/// Wraps a factory for a concrete body type. Pages created by a kind, or by
/// [`PageHandle::new`] with the same body type, are instances of the kind.
#[derive(Clone)]
pub struct PageKind {
    type_id: TypeId,
    type_name: &'static str,
    factory: Rc<dyn Fn() -> Box<dyn Any>>,
}

impl PageKind {
    /// Kind whose pages start from `T::default()`.
    pub fn of<T: Default + 'static>() -> Self {
        Self::with_factory(T::default)
    }

    /// Kind whose pages are built by `factory`.
    pub fn with_factory<T, F>(factory: F) -> Self
    where
        T: 'static,
        F: Fn() -> T + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            factory: Rc::new(move || Box::new(factory()) as Box<dyn Any>),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if `page` is an instance of this kind.
    pub fn matches(&self, page: &PageHandle) -> bool {
        page.kind_id() == self.type_id
    }

    /// Builds a fresh page sized to `bounds`, content container included.
    /// The page is not attached and not cached.
    pub fn instantiate(&self, bounds: Size) -> PageHandle {
        PageHandle::from_parts(self.type_id, self.type_name, (self.factory)(), bounds)
    }
}

impl fmt::Debug for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageKind")
            .field("type_name", &self.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, PartialEq)]
    struct Photo {
        url: String,
    }

    #[derive(Default)]
    struct Caption;

    #[test]
    fn instantiate_sizes_page_and_content() {
        let kind = PageKind::of::<Photo>();
        let page = kind.instantiate(Size::new(320.0, 480.0));

        assert_eq!(page.frame(), Rect::new(0.0, 0.0, 320.0, 480.0));
        assert_eq!(page.content_frame(), page.frame());
        assert!(!page.is_attached());
        assert!(page.is::<Photo>());
        assert!(kind.matches(&page));
    }

    #[test]
    fn kinds_do_not_match_other_bodies() {
        let photo = PageKind::of::<Photo>();
        let caption = PageKind::of::<Caption>();
        let page = caption.instantiate(Size::new(10.0, 10.0));

        assert!(!photo.matches(&page));
        assert!(caption.matches(&page));
    }

    #[test]
    fn handles_compare_by_identity() {
        let kind = PageKind::of::<Photo>();
        let a = kind.instantiate(Size::new(1.0, 1.0));
        let b = kind.instantiate(Size::new(1.0, 1.0));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn content_is_mutable_through_handle() {
        let page = PageHandle::new(Photo::default(), Size::new(5.0, 5.0));
        page.with_content_mut(|photo: &mut Photo| photo.url = "a.png".into());

        assert_eq!(
            page.with_content(|photo: &Photo| photo.url.clone()),
            Some("a.png".to_string())
        );
        assert_eq!(page.with_content(|_: &Caption| ()), None);
    }

    #[test]
    fn set_frame_resizes_content_container() {
        let page = PageHandle::new(Caption, Size::new(100.0, 100.0));
        page.set_frame(Rect::new(200.0, 0.0, 50.0, 80.0));

        assert_eq!(page.frame(), Rect::new(200.0, 0.0, 50.0, 80.0));
        assert_eq!(page.content_frame(), Rect::new(0.0, 0.0, 50.0, 80.0));
    }
}
