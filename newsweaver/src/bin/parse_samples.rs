use newsweaver::parser::NewsParser;
use newsweaver::pipeline::PipelineMessage;

const SAMPLES: &[&str] = &[
    "Give me latest sports news in Hindi",
    "Show me technology updates for this week",
    "Provide recent news about politics",
    "Get me daily business news in Spanish",
    "What's the latest news on artificial intelligence?",
    "Fetch weekly entertainment news",
    "Tell me about current health news in French",
    "Show me today's cryptocurrency news",
    "Get monthly climate news in German",
    "Latest news about education",
    "xyz completely unrelated text",
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let parser = NewsParser::builtin()?;

    println!("\n{}", "=".repeat(60));
    println!("News request parser samples");
    println!("{}", "=".repeat(60));

    for message in SAMPLES {
        let analysis = parser.inspect(message);
        println!("Message: {}", message);
        println!("Is news: {}", analysis.is_news);
        if analysis.is_news {
            let pipeline = PipelineMessage::from_request(&analysis.request, None);
            println!("Formatted: {}", analysis.request.formatted());
            println!("Summary file: {}.md", pipeline.summary_file_stem());
            println!("Look-back: {} day(s)", pipeline.frequency.lookback_days());
        }
        println!("{}", "-".repeat(30));
    }

    Ok(())
}
