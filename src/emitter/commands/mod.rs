//! Built-in per-step generators.
//!
//! `verify*` steps share the generator of their `assert*` twin; whether a
//! failure is hard or soft is up to the Codeception suite configuration.

pub mod assertion;
pub mod dialog;
pub mod interaction;
pub mod navigation;
pub mod scripting;
pub mod storage;
pub mod wait;

use futures::FutureExt;

use super::context::EmitContext;
use super::control_flow;
use super::emission::Emission;
use super::registry::{CommandRegistry, EmitFuture};
use crate::parser::Step;

/// Steps with no deterministic equivalent in generated code
pub const SKIPPED: &[&str] = &[
    "answerOnNextPrompt",
    "chooseCancelOnNextConfirmation",
    "chooseCancelOnNextPrompt",
    "chooseOkOnNextConfirmation",
    "debugger",
    "setSpeed",
];

/// Generator for steps that emit nothing
pub fn skip<'a>(_step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { Ok(Emission::Empty) }.boxed()
}

pub fn register_builtins(registry: &mut CommandRegistry) {
    for name in SKIPPED {
        registry.register_fn(name, skip);
    }

    // Navigation, windows and frames
    registry.register_fn("open", navigation::emit_open);
    registry.register_fn("close", navigation::emit_close);
    registry.register_fn("setWindowSize", navigation::emit_set_window_size);
    registry.register_fn("pause", navigation::emit_pause);
    registry.register_fn("selectFrame", navigation::emit_select_frame);
    registry.register_fn("selectWindow", navigation::emit_select_window);

    // Element interaction
    registry.register_fn("click", interaction::emit_click);
    registry.register_fn("clickAt", interaction::emit_click);
    registry.register_fn("doubleClick", interaction::emit_double_click);
    registry.register_fn("doubleClickAt", interaction::emit_double_click);
    registry.register_fn("mouseDown", interaction::emit_mouse_down);
    registry.register_fn("mouseDownAt", interaction::emit_mouse_down);
    registry.register_fn("mouseUp", interaction::emit_mouse_up);
    registry.register_fn("mouseUpAt", interaction::emit_mouse_up);
    registry.register_fn("mouseMove", interaction::emit_mouse_move);
    registry.register_fn("mouseMoveAt", interaction::emit_mouse_move);
    registry.register_fn("mouseOver", interaction::emit_mouse_move);
    registry.register_fn("mouseOut", interaction::emit_mouse_out);
    registry.register_fn("check", interaction::emit_check);
    registry.register_fn("uncheck", interaction::emit_uncheck);
    registry.register_fn("submit", interaction::emit_submit);
    registry.register_fn("sendKeys", interaction::emit_send_keys);
    registry.register_fn("type", interaction::emit_type);
    registry.register_fn("editContent", interaction::emit_edit_content);
    registry.register_fn("select", interaction::emit_select);
    registry.register_fn("addSelection", interaction::emit_select);
    registry.register_fn("removeSelection", interaction::emit_select);
    registry.register_fn("dragAndDropToObject", interaction::emit_drag_and_drop);

    // Assertions and verifications
    for prefix in ["assert", "verify"] {
        let name = |suffix: &str| format!("{}{}", prefix, suffix);
        registry.register_fn(&name(""), assertion::emit_assert);
        registry.register_fn(&name("Checked"), assertion::emit_assert_checked);
        registry.register_fn(&name("NotChecked"), assertion::emit_assert_not_checked);
        registry.register_fn(&name("Editable"), assertion::emit_assert_editable);
        registry.register_fn(&name("NotEditable"), assertion::emit_assert_not_editable);
        registry.register_fn(&name("ElementPresent"), assertion::emit_assert_element_present);
        registry.register_fn(
            &name("ElementNotPresent"),
            assertion::emit_assert_element_not_present,
        );
        registry.register_fn(&name("Text"), assertion::emit_assert_text);
        registry.register_fn(&name("NotText"), assertion::emit_assert_not_text);
        registry.register_fn(&name("Value"), assertion::emit_assert_value);
        registry.register_fn(&name("SelectedValue"), assertion::emit_assert_value);
        registry.register_fn(
            &name("NotSelectedValue"),
            assertion::emit_assert_not_selected_value,
        );
        registry.register_fn(&name("SelectedLabel"), assertion::emit_assert_selected_label);
        registry.register_fn(&name("Title"), assertion::emit_assert_title);
    }
    registry.register_fn("assertAlert", assertion::emit_assert_alert);
    registry.register_fn("assertConfirmation", assertion::emit_assert_alert);
    registry.register_fn("assertPrompt", assertion::emit_assert_alert);

    // Storage
    registry.register_fn("store", storage::emit_store);
    registry.register_fn("storeText", storage::emit_store_text);
    registry.register_fn("storeAttribute", storage::emit_store_attribute);
    registry.register_fn("storeTitle", storage::emit_store_title);
    registry.register_fn("storeValue", storage::emit_store_value);
    registry.register_fn("storeJson", storage::emit_store_json);
    registry.register_fn("storeWindowHandle", storage::emit_store_window_handle);
    registry.register_fn("storeXpathCount", storage::emit_store_xpath_count);

    // Scripting
    registry.register_fn("executeScript", scripting::emit_execute_script);
    registry.register_fn("executeAsyncScript", scripting::emit_execute_async_script);
    registry.register_fn("runScript", scripting::emit_run_script);
    registry.register_fn("run", scripting::emit_run);
    registry.register_fn("echo", scripting::emit_echo);

    // Control flow
    registry.register_fn("if", control_flow::emit_if);
    registry.register_fn("elseIf", control_flow::emit_else_if);
    registry.register_fn("else", control_flow::emit_else);
    registry.register_fn("end", control_flow::emit_end);
    registry.register_fn("do", control_flow::emit_do);
    registry.register_fn("repeatIf", control_flow::emit_repeat_if);
    registry.register_fn("while", control_flow::emit_while);
    registry.register_fn("forEach", control_flow::emit_for_each);
    registry.register_fn("times", control_flow::emit_times);

    // Waits
    registry.register_fn("waitForElementPresent", wait::emit_wait_for_element_present);
    registry.register_fn(
        "waitForElementNotPresent",
        wait::emit_wait_for_element_not_present,
    );
    registry.register_fn("waitForElementVisible", wait::emit_wait_for_element_visible);
    registry.register_fn(
        "waitForElementNotVisible",
        wait::emit_wait_for_element_not_visible,
    );
    registry.register_fn("waitForElementEditable", wait::emit_wait_for_element_editable);
    registry.register_fn(
        "waitForElementNotEditable",
        wait::emit_wait_for_element_not_editable,
    );
    registry.register_fn("waitForText", wait::emit_wait_for_text);

    // Dialogs
    registry.register_fn(
        "webdriverAnswerOnVisiblePrompt",
        dialog::emit_answer_on_visible_prompt,
    );
    registry.register_fn(
        "webdriverChooseOkOnVisibleConfirmation",
        dialog::emit_choose_ok,
    );
    registry.register_fn(
        "webdriverChooseCancelOnVisibleConfirmation",
        dialog::emit_choose_cancel,
    );
    registry.register_fn("webdriverChooseCancelOnVisiblePrompt", dialog::emit_choose_cancel);
}
