use alloc::sync::Arc;
use core::any::TypeId;

use crate::info::{Type, TypeInfo, TypeKind};

/// A registered type: its identity and its shared descriptor.
#[derive(Debug, Clone)]
pub struct TypeMeta {
    info: Arc<TypeInfo>,
}

impl TypeMeta {
    /// Creates a [`TypeMeta`] from a descriptor.
    #[inline]
    pub fn new(info: TypeInfo) -> Self {
        Self {
            info: Arc::new(info),
        }
    }

    /// Returns the underlying [`Type`].
    #[inline]
    pub fn ty(&self) -> &Type {
        self.info.ty()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.info.ty().id()
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.info.kind()
    }

    /// Returns the descriptor.
    #[inline]
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    /// Returns a shared handle to the descriptor.
    #[inline]
    pub fn info_arc(&self) -> Arc<TypeInfo> {
        Arc::clone(&self.info)
    }
}
