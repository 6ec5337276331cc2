// Copyright 2025 JiangLong.
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

use crate::shared::error::EverestError;
use inquire::Confirm;

/// Asks the operator a yes/no question.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, message: &str) -> Result<bool, EverestError>;
}

/// Interactive terminal prompt. Defaults to "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, message: &str) -> Result<bool, EverestError> {
        Confirm::new(message)
            .with_default(false)
            .prompt()
            .map_err(|e| EverestError::Prompt(e.to_string()))
    }
}
