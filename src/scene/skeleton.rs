use glam::Quat;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::scene::BoneHandle;
use crate::scene::transform::Transform;

/// A single joint of a skeletal hierarchy.
///
/// The rest rotation is captured when the bone is inserted and never changes
/// afterwards. Spring bones rebuild their base pose from it.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub transform: Transform,

    rest_rotation: Quat,
    parent: Option<BoneHandle>,
    children: Vec<BoneHandle>,
}

impl Bone {
    #[inline]
    #[must_use]
    pub fn rest_rotation(&self) -> Quat {
        self.rest_rotation
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<BoneHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[BoneHandle] {
        &self.children
    }
}

/// Skeletal hierarchy supplied by the model loader.
///
/// Bones live in a slot map and are addressed by [`BoneHandle`]. The
/// animation core never restructures the tree; it only looks bones up by
/// name and rewrites their local rotation.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: SlotMap<BoneHandle, Bone>,
    roots: Vec<BoneHandle>,
    by_name: FxHashMap<String, BoneHandle>,
}

impl Skeleton {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bone under `parent` (or as a root). The transform's current
    /// rotation becomes the bone's rest rotation.
    ///
    /// Duplicate names keep the first bone for name lookups, matching the
    /// "first match in traversal" lookup of typical scene graphs.
    pub fn add_bone(
        &mut self,
        name: &str,
        transform: Transform,
        parent: Option<BoneHandle>,
    ) -> BoneHandle {
        let parent = parent.filter(|p| self.bones.contains_key(*p));
        let handle = self.bones.insert(Bone {
            name: name.to_string(),
            rest_rotation: transform.rotation,
            transform,
            parent,
            children: Vec::new(),
        });

        match parent {
            Some(p) => self.bones[p].children.push(handle),
            None => self.roots.push(handle),
        }
        self.by_name.entry(name.to_string()).or_insert(handle);

        handle
    }

    #[inline]
    #[must_use]
    pub fn find(&self, name: &str) -> Option<BoneHandle> {
        self.by_name.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn bone(&self, handle: BoneHandle) -> Option<&Bone> {
        self.bones.get(handle)
    }

    #[inline]
    pub fn bone_mut(&mut self, handle: BoneHandle) -> Option<&mut Bone> {
        self.bones.get_mut(handle)
    }

    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[BoneHandle] {
        &self.roots
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Bone handles in depth-first pre-order, roots in insertion order.
    #[must_use]
    pub fn traverse(&self) -> Vec<BoneHandle> {
        let mut order = Vec::with_capacity(self.bones.len());
        let mut stack: Vec<BoneHandle> = self.roots.iter().rev().copied().collect();

        while let Some(handle) = stack.pop() {
            let Some(bone) = self.bones.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(bone.children.iter().rev().copied());
        }

        order
    }

    /// First bone in hierarchy order.
    #[must_use]
    pub fn first_bone(&self) -> Option<BoneHandle> {
        self.roots.first().copied()
    }

    /// First bone in hierarchy order accepted by `pred`.
    #[must_use]
    pub fn first_bone_where(&self, mut pred: impl FnMut(&Bone) -> bool) -> Option<BoneHandle> {
        self.traverse()
            .into_iter()
            .find(|&handle| self.bones.get(handle).is_some_and(&mut pred))
    }
}
