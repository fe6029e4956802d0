use std::env;
use std::path::Path;

use greenbite::{
    analyze_fridge, corpus, extract_recipe, format_recipe, AppConfig, Extraction,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = AppConfig::load()?;

    match args.get(1).map(String::as_str) {
        Some("import") => {
            let url = args
                .get(2)
                .ok_or("Usage: greenbite import <url>")?;
            match extract_recipe(url, &config).await {
                Extraction::Failed => println!("Could not extract recipe information."),
                outcome => {
                    if let Some(recipe) = outcome.into_recipe() {
                        println!("{}", format_recipe(&recipe));
                    }
                }
            }
        }
        Some("analyze") => {
            let usage = "Usage: greenbite analyze <fridge-file> <corpus-file>";
            let fridge_path = args.get(2).ok_or(usage)?;
            let corpus_path = args.get(3).ok_or(usage)?;

            let records = corpus::load_fridge_listing(Path::new(fridge_path))?;
            let recipes = corpus::load_corpus(Path::new(corpus_path))?;
            let analysis = analyze_fridge(&records, &recipes, &config.analysis);

            println!("{}", analysis.summary);
            if !analysis.recipes.is_empty() {
                println!("Recipe suggestions:");
                for recipe in &analysis.recipes {
                    println!(
                        "- {} ({} matching, sustainability {}/10)",
                        recipe.title, recipe.match_count, recipe.sustainability_score
                    );
                }
            }
        }
        _ => {
            eprintln!("Usage: greenbite <import|analyze> ...");
        }
    }

    Ok(())
}
