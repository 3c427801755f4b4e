// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The reusable lifecycle steps every controller composes into its
//! Create/Update/Delete/Apply/Get/GetByReference pipelines.

mod build_new_state;
mod build_update_state;
mod check_duplicate;
mod delete_resource;
mod extract_resource_id;
mod load_by_reference;
mod load_existing;
mod load_existing_for_delete;
mod load_for_apply;
mod load_target;
mod persist;
mod resolve_slug;
mod validate_proto;

pub use build_new_state::BuildNewState;
pub use build_update_state::BuildUpdateState;
pub use check_duplicate::CheckDuplicate;
pub use delete_resource::DeleteResource;
pub use extract_resource_id::ExtractResourceId;
pub use load_by_reference::{CurrentOnlyResolver, LoadByReference, VersionResolver};
pub use load_existing::LoadExisting;
pub use load_existing_for_delete::LoadExistingForDelete;
pub use load_for_apply::LoadForApply;
pub use load_target::LoadTarget;
pub use persist::Persist;
pub use resolve_slug::ResolveSlug;
pub use validate_proto::ValidateProto;
