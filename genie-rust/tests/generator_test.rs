use genie_sdk::{
    generate_code, generate_idea,
    genie_sdk_test::{MockChatModel, MockCompleteResult},
    sample_code_bundle, Category, CategoryFilter, CodeBundle, FileArtifact, GenerationMode,
    Genie, GenieConfig, GenieError, Idea, Session, CODE_PARAMS, IDEA_PARAMS, SAMPLE_IDEAS,
};
use serde_json::json;
use std::sync::Arc;

fn remote(model: &Arc<MockChatModel>) -> GenerationMode {
    GenerationMode::remote(model.clone())
}

fn sample_idea() -> Idea {
    Idea {
        title: "Procrastination Scheduler".to_string(),
        description: "Schedules your procrastination so it happens on time.".to_string(),
        features: vec!["Snooze planner".to_string(), "Guilt meter".to_string()],
        tech_stack: "HTML, CSS, JavaScript".to_string(),
        category: Some(Category::Productivity),
        api_cost: "About $0.30".to_string(),
        system_prompt: "Build a procrastination scheduler.".to_string(),
    }
}

#[tokio::test]
async fn remote_idea_round_trips_field_for_field() {
    let model = Arc::new(MockChatModel::new());
    let expected = sample_idea();
    model.enqueue(serde_json::to_string(&expected).unwrap());

    let idea = generate_idea(&remote(&model), CategoryFilter::All, &[])
        .await
        .expect("idea generation succeeds");

    assert_eq!(idea, expected);
}

#[tokio::test]
async fn remote_idea_recovers_from_surrounding_prose() {
    let model = Arc::new(MockChatModel::new());
    model.enqueue(
        r#"Sure! {"title":"Sock Oracle","description":"Predicts which sock goes missing next.","features":["Forecasts"],"techStack":"HTML","category":"utility","apiCost":"$0.10","systemPrompt":"Build it."} Hope you like it!"#,
    );

    let idea = generate_idea(&remote(&model), CategoryFilter::All, &[])
        .await
        .expect("idea generation succeeds");

    assert_eq!(idea.title, "Sock Oracle");
    assert_eq!(idea.category, Some(Category::Utility));
    assert_eq!(idea.features, vec!["Forecasts".to_string()]);
}

#[tokio::test]
async fn remote_idea_without_json_is_parse_error() {
    let model = Arc::new(MockChatModel::new());
    model.enqueue("I'm sorry, I can't think of anything today.");

    let error = generate_idea(&remote(&model), CategoryFilter::All, &[])
        .await
        .expect_err("idea generation fails");

    assert!(matches!(error, GenieError::Parse(_)), "{error:?}");
}

#[tokio::test]
async fn remote_idea_without_title_is_parse_error() {
    let model = Arc::new(MockChatModel::new());
    model.enqueue(r#"{"title":"","description":"Nameless."}"#);

    let error = generate_idea(&remote(&model), CategoryFilter::All, &[])
        .await
        .expect_err("idea generation fails");

    assert!(matches!(error, GenieError::Parse(_)), "{error:?}");
}

#[tokio::test]
async fn remote_idea_request_carries_filter_history_and_params() {
    let model = Arc::new(MockChatModel::new());
    model.enqueue(serde_json::to_string(&sample_idea()).unwrap());
    let history = vec!["Sock Oracle".to_string()];

    generate_idea(
        &remote(&model),
        CategoryFilter::Only(Category::Entertainment),
        &history,
    )
    .await
    .expect("idea generation succeeds");

    let inputs = model.tracked_inputs();
    assert_eq!(inputs.len(), 1);
    let input = &inputs[0];
    assert_eq!(input.params, IDEA_PARAMS);
    assert!(input.system_prompt.contains("category: entertainment"));
    assert!(input.system_prompt.contains("Avoid these previously generated ideas: Sock Oracle."));
    assert_eq!(input.user_prompt, "Generate a random $1 software idea.");
}

#[tokio::test]
async fn remote_errors_propagate_unchanged() {
    let model = Arc::new(MockChatModel::new());
    model.enqueue(MockCompleteResult::error(GenieError::Remote {
        status: None,
        message: "rate limited".to_string(),
    }));

    let error = generate_idea(&remote(&model), CategoryFilter::All, &[])
        .await
        .expect_err("idea generation fails");

    match error {
        GenieError::Remote { status, message } => {
            assert_eq!(status, None);
            assert_eq!(message, "rate limited");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn remote_error_without_message_gets_default() {
    let model = Arc::new(MockChatModel::new());
    model
        .enqueue(GenieError::Remote {
            status: None,
            message: String::new(),
        })
        .enqueue(GenieError::Remote {
            status: None,
            message: String::new(),
        });

    let idea_error = generate_idea(&remote(&model), CategoryFilter::All, &[])
        .await
        .expect_err("idea generation fails");
    assert_eq!(idea_error.to_string(), "Error generating idea");

    let code_error = generate_code(&remote(&model), &sample_idea())
        .await
        .expect_err("code generation fails");
    assert_eq!(code_error.to_string(), "Error generating code");
}

#[tokio::test]
async fn remote_code_parses_bundle_and_sends_idea() {
    let model = Arc::new(MockChatModel::new());
    let expected = CodeBundle {
        files: vec![
            FileArtifact::new("index.html", "<h1>Hi</h1>"),
            FileArtifact::new("app.js", "console.log('hi');"),
        ],
    };
    model.enqueue(format!(
        "Here is your code:\n```json\n{}\n```",
        serde_json::to_string_pretty(&expected).unwrap()
    ));

    let idea = sample_idea();
    let bundle = generate_code(&remote(&model), &idea)
        .await
        .expect("code generation succeeds");

    assert_eq!(bundle, expected);

    let inputs = model.tracked_inputs();
    let input = &inputs[0];
    assert_eq!(input.params, CODE_PARAMS);
    assert!(input.user_prompt.contains("Title: Procrastination Scheduler"));
    assert!(input.user_prompt.contains("Features: Snooze planner, Guilt meter"));
    assert!(input.user_prompt.contains("Prompt: Build a procrastination scheduler."));
}

#[tokio::test]
async fn remote_code_without_json_degrades_to_raw_file() {
    let model = Arc::new(MockChatModel::new());
    let reply = "<html>\n  <body>No JSON, just { markup </body>\n</html>";
    model.enqueue(reply);

    let bundle = generate_code(&remote(&model), &sample_idea())
        .await
        .expect("code generation never fails on unparseable replies");

    assert_eq!(
        bundle,
        CodeBundle {
            files: vec![FileArtifact::new("response.txt", reply)],
        }
    );
}

#[tokio::test]
async fn remote_code_with_empty_files_degrades_to_raw_file() {
    let model = Arc::new(MockChatModel::new());
    let reply = json!({ "files": [] }).to_string();
    model.enqueue(reply.as_str());

    let bundle = generate_code(&remote(&model), &sample_idea())
        .await
        .expect("code generation succeeds");

    assert_eq!(bundle.files.len(), 1);
    assert_eq!(bundle.files[0].content, reply);
}

#[tokio::test]
async fn sample_code_bundle_has_three_files_with_title() {
    let idea = sample_idea();
    let bundle = generate_code(&GenerationMode::Sample, &idea)
        .await
        .expect("sample code never fails");

    let names: Vec<_> = bundle.files.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(names, ["index.html", "styles.css", "script.js"]);
    for file in &bundle.files {
        assert!(
            file.content.contains(&idea.title),
            "{} does not mention the title",
            file.name
        );
    }
    assert_eq!(bundle, sample_code_bundle(&idea));
}

#[tokio::test]
async fn sample_idea_avoids_history_until_exhausted() {
    let filter = CategoryFilter::Only(Category::Productivity);
    let matching: Vec<String> = SAMPLE_IDEAS
        .iter()
        .filter(|idea| idea.category == Category::Productivity)
        .map(|idea| idea.title.to_string())
        .collect();

    let mut history = Vec::new();
    for _ in 0..matching.len() {
        let idea = generate_idea(&GenerationMode::Sample, filter, &history)
            .await
            .unwrap();
        assert!(!history.contains(&idea.title));
        history.push(idea.title);
    }

    for _ in 0..5 {
        let idea = generate_idea(&GenerationMode::Sample, filter, &history)
            .await
            .unwrap();
        assert!(matching.contains(&idea.title));
        assert!(idea.validate().is_ok());
        history.push(idea.title);
    }
}

#[tokio::test]
async fn genie_without_credential_uses_samples() {
    let genie = Genie::new(GenieConfig::default());
    assert!(genie.mode(None).is_sample());
    assert!(genie.mode(Some("   ")).is_sample());
    assert!(!genie.mode(Some("sk-test")).is_sample());

    let idea = genie
        .generate_idea(None, CategoryFilter::All, &[])
        .await
        .unwrap();
    assert!(SAMPLE_IDEAS.iter().any(|sample| sample.title == idea.title));

    let bundle = genie.generate_code(&idea, None).await.unwrap();
    assert_eq!(bundle.files.len(), 3);
}

#[tokio::test]
async fn failed_spin_leaves_session_untouched() {
    let model = Arc::new(MockChatModel::new());
    let mode = remote(&model);
    model
        .enqueue(serde_json::to_string(&sample_idea()).unwrap())
        .enqueue(GenieError::Protocol("bad envelope".to_string()));

    let mut session = Session::new(CategoryFilter::All);
    session.spin(&mode).await.expect("first spin succeeds");
    let before = session.history().to_vec();

    let error = session.spin(&mode).await.expect_err("second spin fails");
    assert!(matches!(error, GenieError::Protocol(_)));
    assert_eq!(session.history(), before.as_slice());
    assert_eq!(
        session.current_idea().map(|idea| idea.title.as_str()),
        Some("Procrastination Scheduler")
    );
}

#[tokio::test]
async fn spin_fills_category_from_filter() {
    let model = Arc::new(MockChatModel::new());
    model.enqueue(r#"{"title":"Meeting Bingo","description":"Bingo for meetings."}"#);

    let mut session = Session::new(CategoryFilter::Only(Category::Work));
    let idea = session.spin(&remote(&model)).await.unwrap();

    assert_eq!(idea.category, Some(Category::Work));
    assert_eq!(session.history(), ["Meeting Bingo".to_string()]);
}
