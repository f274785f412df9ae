// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Classification tags for recorded events.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// What a recorded region represents. Purely descriptive; the aggregator uses
/// it to group events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A region with no more specific classification.
    #[default]
    Ordinary,
    /// Graph construction or a graph-level pass.
    Graph,
    /// Whole-program setup or execution.
    Program,
    /// Compilation of a kernel or program.
    Compile,
    /// Source or IR generation.
    CodeGen,
    /// Numeric computation.
    Computation,
    /// Host/device or device/device data movement.
    DataTransfer,
    /// A single runtime instruction.
    Instruction,
    /// Anything else.
    Other,
}

impl EventType {
    /// A stable lowercase name, suitable for grouping keys.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Ordinary => "ordinary",
            EventType::Graph => "graph",
            EventType::Program => "program",
            EventType::Compile => "compile",
            EventType::CodeGen => "code_gen",
            EventType::Computation => "computation",
            EventType::DataTransfer => "data_transfer",
            EventType::Instruction => "instruction",
            EventType::Other => "other",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
