use anyhow::Result;
use clap::{Parser, Subcommand};
use wit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "wit",
    version = "0.1.0",
    about = "A minimal content-addressable version control backend",
    long_about = "A local, single-repository version-control backend: \
    a content-addressable object store plus a binary staging index, \
    exposed through git-style plumbing commands.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "cat-file", about = "Print the content or type of an object")]
    CatFile {
        #[arg(short = 'p', long, help = "Pretty-print the object body")]
        pretty: bool,
        #[arg(short = 't', long = "type", help = "Print the object type")]
        show_type: bool,
        #[arg(index = 1, help = "The object SHA")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "update-index", about = "Stage file contents in the index")]
    UpdateIndex {
        #[arg(long, help = "Stage the given working-tree files", num_args = 1..)]
        add: Vec<String>,
        #[arg(
            long,
            value_delimiter = ',',
            value_name = "MODE,SHA,PATH",
            help = "Stage an explicit mode,sha,path triple"
        )]
        cacheinfo: Option<Vec<String>>,
    },
    #[command(name = "write-tree", about = "Write the index out as a tree object")]
    WriteTree,
    #[command(name = "commit-tree", about = "Wrap a tree in a commit object")]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA")]
        tree: String,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "update-ref", about = "Point a branch ref at a commit")]
    UpdateRef {
        #[arg(index = 1, help = "The ref name, e.g. refs/heads/master")]
        ref_name: String,
        #[arg(index = 2, help = "The commit SHA")]
        sha: String,
    },
    #[command(name = "ls-files", about = "List staged paths")]
    LsFiles,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = Box::new(std::io::stdout());

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(path, stdout)?,
                None => Repository::new(".", stdout)?,
            };
            repository.init()
        }
        Commands::CatFile {
            pretty,
            show_type,
            sha,
        } => {
            let repository = Repository::new(".", stdout)?;
            match (*pretty, *show_type) {
                (true, false) => repository.cat_file_pretty(sha),
                (false, true) => repository.cat_file_type(sha),
                _ => Err(anyhow::anyhow!("specify exactly one of -p or -t")),
            }
        }
        Commands::HashObject { write, file } => {
            let repository = Repository::new(".", stdout)?;
            repository.hash_object(file, *write)
        }
        Commands::UpdateIndex { add, cacheinfo } => {
            let repository = Repository::new(".", stdout)?;
            match cacheinfo {
                Some(triple) if triple.len() == 3 => {
                    repository.update_index_cacheinfo(&triple[0], &triple[1], &triple[2])
                }
                Some(_) => Err(anyhow::anyhow!("--cacheinfo takes mode,sha,path")),
                None if !add.is_empty() => repository.update_index_add(add),
                None => Err(anyhow::anyhow!("nothing to stage")),
            }
        }
        Commands::WriteTree => {
            let repository = Repository::new(".", stdout)?;
            repository.write_tree()
        }
        Commands::CommitTree { tree, message } => {
            let repository = Repository::new(".", stdout)?;
            repository.commit_tree(tree, message)
        }
        Commands::UpdateRef { ref_name, sha } => {
            let repository = Repository::new(".", stdout)?;
            repository.update_ref(ref_name, sha)
        }
        Commands::LsFiles => {
            let repository = Repository::new(".", stdout)?;
            repository.ls_files()
        }
    }
}
