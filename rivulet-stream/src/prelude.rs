// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub use crate::combine_latest::CombineLatestExt;
pub use crate::decode::DecodeExt;
pub use crate::map_value::MapValueExt;
pub use crate::try_map_value::TryMapValueExt;
