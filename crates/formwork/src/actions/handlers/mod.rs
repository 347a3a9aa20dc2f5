// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Built-in action handlers.

mod captcha;
mod display;
mod ip;
mod message;
mod redirect;
mod reset;
mod save;

pub use captcha::{CaptchaAction, RESPONSE_FIELD};
pub use display::{resolve_route, DisplayAction};
pub use ip::IpAction;
pub use message::MessageAction;
pub use redirect::{RedirectAction, FLASH_KEY};
pub use reset::ResetAction;
pub use save::SaveAction;
