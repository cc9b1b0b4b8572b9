use std::{
    fs,
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use tg_bot_schema::{render_type, snake_case, Extractor, Schema, BOT_API_DOCS_URL};

fn md_to_html(md: &str) -> String {
    let parser = pulldown_cmark::Parser::new(md);
    let mut buf = String::new();
    pulldown_cmark::html::push_html(&mut buf, parser);
    buf
}

struct Serialized {
    content: String,
    path: String,
}

#[derive(Default)]
struct Indexer {
    out_dir: PathBuf,
    inner: Vec<Serialized>,
}

impl Indexer {
    fn new(out_dir: &Path) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
            inner: vec![],
        }
    }

    fn add(&mut self, schema: &Schema, formats: Vec<Format>) -> anyhow::Result<()> {
        for format in formats {
            let (path, content) = match format {
                Format::Json(path) => (path, schema.to_json_pretty()?),
                Format::MinimizedJson(path) => (path, schema.to_json()?),
            };
            self.inner.push(Serialized {
                content,
                path: path.to_string(),
            });
        }

        Ok(())
    }

    fn add_docs(&mut self, schema: &Schema) {
        for entry in schema.types.values() {
            self.inner.push(Serialized {
                content: render_type(entry, schema),
                path: format!("docs/{}.md", snake_case(&entry.name)),
            });
        }
    }

    fn gen(self) -> anyhow::Result<()> {
        let mut index = String::new();

        for Serialized { content, path } in self.inner {
            let file = self.out_dir.join(&path);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, content)?;
            index += &format!("* [{path}]({path})\n", path = path);
        }

        let html = md_to_html(&index);
        fs::write(self.out_dir.join("index.html"), html)?;

        Ok(())
    }
}

enum Format {
    Json(&'static str),
    MinimizedJson(&'static str),
}

#[derive(StructOpt)]
#[structopt(about = "Scrapes the Telegram Bot API documentation into a JSON schema")]
struct Opt {
    /// Documentation page to fetch, also the base of every `href`
    #[structopt(long)]
    url: Option<String>,
    /// Read the page from a local HTML file instead of fetching it
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Directory to write `api.json`, `api.min.json` and `index.html` to
    #[structopt(long, default_value = ".", parse(from_os_str))]
    out_dir: PathBuf,
    /// Fail when a method's return type cannot be inferred
    #[structopt(long)]
    strict: bool,
    /// Also render Markdown documentation for every type into `docs/`
    #[structopt(long)]
    docs: bool,
}

fn init_logger() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn scrape(opt: &Opt) -> anyhow::Result<Schema> {
    let url = opt.url.as_deref().unwrap_or(BOT_API_DOCS_URL);
    let html = match &opt.input {
        Some(path) => fs::read_to_string(path)?,
        None => reqwest::blocking::get(url)?.error_for_status()?.text()?,
    };

    let mut schema = Extractor::from_str(&html)
        .docs_url(url)
        .strict_returns(opt.strict)
        .extract()?;
    schema.link_subtypes();
    Ok(schema)
}

fn write(schema: &Schema, out_dir: &Path, docs: bool) -> anyhow::Result<()> {
    let mut indexer = Indexer::new(out_dir);
    indexer.add(
        schema,
        vec![Format::Json("api.json"), Format::MinimizedJson("api.min.json")],
    )?;
    if docs {
        indexer.add_docs(schema);
    }
    indexer.gen()
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let opt = Opt::from_args();

    log::info!("Starting scrape");
    let schema = scrape(&opt)?;
    write(&schema, &opt.out_dir, opt.docs)?;

    log::info!("Total types: {}", schema.types.len());
    log::info!("Total methods: {}", schema.methods.len());
    log::info!("Finish");

    Ok(())
}
