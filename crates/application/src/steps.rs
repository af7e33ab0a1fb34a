//! Built-in step table
//!
//! Phrases are matched in the order they are registered here. Feature files
//! depend on the exact wording and capture positions, so existing phrases
//! must never be reworded.

use apistep_domain::{Charset, DataFormat, HttpMethod, NodeType, NumericType, TimeDirection};

use crate::error::ApplicationResult;
use crate::generator::SENTENCE_WORD_LENGTH;
use crate::registry::{Slot, StepArgs, StepFuture, StepPattern, StepRegistry};
use crate::scenario::ScenarioContext;

/// Registry specialised to the scenario context.
pub type ScenarioRegistry = StepRegistry<ScenarioContext>;

fn alternatives(names: &[&str]) -> String {
    names.join("|")
}

/// Builds the registry holding every built-in step.
///
/// # Errors
///
/// Returns a configuration error if the table is malformed.
pub fn step_registry() -> ApplicationResult<ScenarioRegistry> {
    let mut registry = ScenarioRegistry::new();
    let charsets = alternatives(Charset::NAMES);
    let methods = alternatives(HttpMethod::NAMES);
    let numbers = alternatives(NumericType::NAMES);
    let directions = alternatives(TimeDirection::NAMES);
    let node_types = alternatives(NodeType::NAMES);
    let scalar_types = alternatives(NodeType::SCALAR_NAMES);
    let formats = alternatives(DataFormat::NAMES);

    // Random data generation
    registry.register(
        StepPattern::new(format!(
            r#"^I generate a random word having from "(\d+)" to "(\d+)" of "({charsets})" characters and save it as "([^"]*)"$"#
        ))
        .capture(Slot::Integer)
        .capture(Slot::Integer)
        .capture(Slot::Choice(Charset::NAMES))
        .capture(Slot::Text),
        generate_word,
    )?;
    registry.register(
        StepPattern::new(format!(
            r#"^I generate a random sentence having from "(\d+)" to "(\d+)" of "({charsets})" words and save it as "([^"]*)"$"#
        ))
        .bind(SENTENCE_WORD_LENGTH.0)
        .bind(SENTENCE_WORD_LENGTH.1)
        .capture(Slot::Integer)
        .capture(Slot::Integer)
        .capture(Slot::Choice(Charset::NAMES))
        .capture(Slot::Text),
        generate_sentence,
    )?;
    registry.register(
        StepPattern::new(format!(
            r#"^I generate a random "({numbers})" in the range from "(\d+)" to "(\d+)" and save it as "([^"]*)"$"#
        ))
        .capture(Slot::Choice(NumericType::NAMES))
        .capture(Slot::Integer)
        .capture(Slot::Integer)
        .capture(Slot::Text),
        generate_number,
    )?;
    registry.register(
        StepPattern::new(r#"^I generate a random bool and save it as "([^"]*)"$"#).capture(Slot::Text),
        generate_bool,
    )?;
    registry.register(
        StepPattern::new(format!(
            r#"^I generate current time and travel "({directions})" "([^"]*)" in time and save it as "([^"]*)"$"#
        ))
        .capture(Slot::Choice(TimeDirection::NAMES))
        .capture(Slot::Text)
        .capture(Slot::Text),
        generate_time,
    )?;

    // Sending requests
    registry.register(
        StepPattern::new(format!(
            r#"^I prepare new "({methods})" request to "([^"]*)" and save it as "([^"]*)"$"#
        ))
        .capture(Slot::Choice(HttpMethod::NAMES))
        .capture(Slot::Text)
        .capture(Slot::Text),
        prepare_request,
    )?;
    registry.register(
        StepPattern::new(r#"^I set following headers for prepared request "([^"]*)":$"#).capture(Slot::Text),
        set_request_headers,
    )?;
    registry.register(
        StepPattern::new(r#"^I set following body for prepared request "([^"]*)":$"#).capture(Slot::Text),
        set_request_body,
    )?;
    registry.register(
        StepPattern::new(r#"^I set following cookies for prepared request "([^"]*)":$"#).capture(Slot::Text),
        set_request_cookies,
    )?;
    registry.register(
        StepPattern::new(r#"^I set following form for prepared request "([^"]*)":$"#).capture(Slot::Text),
        set_request_form,
    )?;
    registry.register(
        StepPattern::new(r#"^I send request "([^"]*)"$"#).capture(Slot::Text),
        send_request,
    )?;
    registry.register(
        StepPattern::new(format!(
            r#"^I send "({methods})" request to "([^"]*)" with body and headers:$"#
        ))
        .capture(Slot::Choice(HttpMethod::NAMES))
        .capture(Slot::Text),
        send_with_body_and_headers,
    )?;

    // Assertions
    registry.register(
        StepPattern::new(r#"^the response should have header "([^"]*)"$"#).capture(Slot::Text),
        assert_header_exists,
    )?;
    registry.register(
        StepPattern::new(r#"^the response should have header "([^"]*)" of value "([^"]*)"$"#)
            .capture(Slot::Text)
            .capture(Slot::Text),
        assert_header_value,
    )?;
    registry.register(
        StepPattern::new(r#"^the response should have cookie "([^"]*)"$"#).capture(Slot::Text),
        assert_cookie_exists,
    )?;
    registry.register(
        StepPattern::new(r#"^the response should have cookie "([^"]*)" of value "([^"]*)"$"#)
            .capture(Slot::Text)
            .capture(Slot::Text),
        assert_cookie_value,
    )?;
    registry.register(
        StepPattern::new(r"^the response status code should be (\d+)$").capture(Slot::Integer),
        assert_status,
    )?;

    for format in DataFormat::NAMES {
        registry.register(
            StepPattern::new(format!(r#"^the {format} response should have nodes "([^"]*)"$"#))
                .bind(*format)
                .capture(Slot::Text),
            assert_nodes_exist,
        )?;
        registry.register(
            StepPattern::new(format!(r#"^the {format} response should have node "([^"]*)"$"#))
                .bind(*format)
                .capture(Slot::Text),
            assert_nodes_exist,
        )?;
        registry.register(
            StepPattern::new(format!(
                r#"^the {format} node "([^"]*)" should be "({scalar_types})" of value "([^"]*)"$"#
            ))
            .bind(*format)
            .capture(Slot::Text)
            .capture(Slot::Choice(NodeType::SCALAR_NAMES))
            .capture(Slot::Text),
            assert_node_value,
        )?;
        registry.register(
            StepPattern::new(format!(
                r#"^the {format} node "([^"]*)" should be slice of length "(\d+)"$"#
            ))
            .bind(*format)
            .capture(Slot::Text)
            .capture(Slot::Integer),
            assert_node_slice_length,
        )?;
        registry.register(
            StepPattern::new(format!(r#"^the {format} node "([^"]*)" should be "({node_types})"$"#))
                .bind(*format)
                .capture(Slot::Text)
                .capture(Slot::Choice(NodeType::NAMES)),
            assert_node_type,
        )?;
        registry.register(
            StepPattern::new(format!(r#"^the {format} node "([^"]*)" should not be "({node_types})"$"#))
                .bind(*format)
                .capture(Slot::Text)
                .capture(Slot::Choice(NodeType::NAMES)),
            assert_node_not_type,
        )?;
        registry.register(
            StepPattern::new(format!(r#"^the {format} node "([^"]*)" should match regExp "([^"]*)"$"#))
                .bind(*format)
                .capture(Slot::Text)
                .capture(Slot::Text),
            assert_node_matches,
        )?;
        registry.register(
            StepPattern::new(format!(
                r#"^the {format} node "([^"]*)" should be valid according to schema "([^"]*)"$"#
            ))
            .bind(*format)
            .capture(Slot::Text)
            .capture(Slot::Text),
            assert_node_schema,
        )?;
        registry.register(
            StepPattern::new(format!(r#"^the {format} node "([^"]*)" should be valid according to schema:$"#))
                .bind(*format)
                .capture(Slot::Text),
            assert_node_schema_text,
        )?;
    }

    registry.register(
        StepPattern::new(format!(r#"^the response body should have type "({formats})"$"#))
            .capture(Slot::Choice(DataFormat::NAMES)),
        assert_body_format,
    )?;
    registry.register(
        StepPattern::new(r#"^the response body should be valid according to JSON schema "([^"]*)"$"#)
            .capture(Slot::Text),
        assert_body_schema,
    )?;
    registry.register(
        StepPattern::new(r"^the response body should be valid according to JSON schema:$"),
        assert_body_schema_text,
    )?;
    registry.register(
        StepPattern::new(
            r#"^time between last request and response should be less than or equal to "([^"]*)"$"#,
        )
        .capture(Slot::Text),
        assert_latency,
    )?;

    // Preserving data
    registry.register(
        StepPattern::new(r#"^I save "([^"]*)" as "([^"]*)"$"#)
            .capture(Slot::Text)
            .capture(Slot::Text),
        save,
    )?;
    for format in DataFormat::NAMES {
        registry.register(
            StepPattern::new(format!(
                r#"^I save from the last response {format} node "([^"]*)" as "([^"]*)"$"#
            ))
            .bind(*format)
            .capture(Slot::Text)
            .capture(Slot::Text),
            save_node,
        )?;
    }

    // Debugging
    registry.register(StepPattern::new(r"^I print last response body$"), print_last_response_body)?;
    registry.register(StepPattern::new(r"^I start debug mode$"), start_debug)?;
    registry.register(StepPattern::new(r"^I stop debug mode$"), stop_debug)?;

    // Flow control
    registry.register(StepPattern::new(r#"^I wait "([^"]*)""#).capture(Slot::Text), wait)?;
    registry.register(StepPattern::new(r"^I stop scenario execution$"), stop_scenario)?;

    Ok(registry)
}

fn generate_word(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.generate_word(args.choice(2)?, args.integer(0)?, args.integer(1)?, args.text(3)?) })
}

fn generate_sentence(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        ctx.generate_sentence(
            args.choice(4)?,
            (args.integer(2)?, args.integer(3)?),
            (args.integer(0)?, args.integer(1)?),
            args.text(5)?,
        )
    })
}

fn generate_number(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.generate_number(args.choice(0)?, args.integer(1)?, args.integer(2)?, args.text(3)?) })
}

fn generate_bool(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        ctx.generate_bool(args.text(0)?);
        Ok(())
    })
}

fn generate_time(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.generate_time(args.choice(0)?, args.text(1)?, args.text(2)?) })
}

fn prepare_request(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.prepare_request(args.choice(0)?, args.text(1)?, args.text(2)?) })
}

fn set_request_headers(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.set_request_headers(args.text(0)?, args.docstring()?) })
}

fn set_request_body(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.set_request_body(args.text(0)?, args.docstring()?) })
}

fn set_request_cookies(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.set_request_cookies(args.text(0)?, args.docstring()?) })
}

fn set_request_form(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.set_request_form(args.text(0)?, args.docstring()?) })
}

fn send_request(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.send_request(args.text(0)?).await })
}

fn send_with_body_and_headers(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        ctx.send_with_body_and_headers(args.choice(0)?, args.text(1)?, args.docstring()?)
            .await
    })
}

fn assert_header_exists(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_header_exists(args.text(0)?) })
}

fn assert_header_value(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_header_value(args.text(0)?, args.text(1)?) })
}

fn assert_cookie_exists(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_cookie_exists(args.text(0)?) })
}

fn assert_cookie_value(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_cookie_value(args.text(0)?, args.text(1)?) })
}

fn assert_status(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_status(args.integer(0)?) })
}

fn assert_nodes_exist(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_nodes_exist(args.text(0)?, args.text(1)?) })
}

fn assert_node_value(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_node_value(args.text(0)?, args.text(1)?, args.choice(2)?, args.text(3)?) })
}

fn assert_node_slice_length(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_node_slice_length(args.text(0)?, args.text(1)?, args.integer(2)?) })
}

fn assert_node_type(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_node_type(args.text(0)?, args.text(1)?, args.choice(2)?) })
}

fn assert_node_not_type(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_node_not_type(args.text(0)?, args.text(1)?, args.choice(2)?) })
}

fn assert_node_matches(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_node_matches(args.text(0)?, args.text(1)?, args.text(2)?) })
}

fn assert_node_schema(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        ctx.assert_node_schema(args.text(0)?, args.text(1)?, args.text(2)?)
            .await
    })
}

fn assert_node_schema_text(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        ctx.assert_node_schema_text(args.text(0)?, args.text(1)?, args.docstring()?)
            .await
    })
}

fn assert_body_format(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_body_format(args.choice(0)?) })
}

fn assert_body_schema(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_body_schema(args.text(0)?).await })
}

fn assert_body_schema_text(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_body_schema_text(args.docstring()?).await })
}

fn assert_latency(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.assert_latency(args.text(0)?) })
}

fn save(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.save(args.text(0)?, args.text(1)?) })
}

fn save_node(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.save_node(args.text(0)?, args.text(1)?, args.text(2)?) })
}

fn print_last_response_body(ctx: &mut ScenarioContext, _: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.print_last_response_body() })
}

fn start_debug(ctx: &mut ScenarioContext, _: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        ctx.start_debug();
        Ok(())
    })
}

fn stop_debug(ctx: &mut ScenarioContext, _: StepArgs) -> StepFuture<'_> {
    Box::pin(async move {
        ctx.stop_debug();
        Ok(())
    })
}

fn wait(ctx: &mut ScenarioContext, args: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.wait(args.text(0)?).await })
}

fn stop_scenario(ctx: &mut ScenarioContext, _: StepArgs) -> StepFuture<'_> {
    Box::pin(async move { ctx.stop_scenario() })
}
