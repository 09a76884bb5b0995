/// Usage document printed by the `help` and default tasks.
pub const HELP_TEXT: &str = "\
--------------------------------------------------------------------------------
 Build and release tasks for the service: formatting, docker packaging and
 publishing, and version bumps.

 Supported Tasks:
   [default]         : Shows help documentation.

   help              : Shows this help message.

   format            : Formats the README and source files.

   package           : Packages the service into a docker image. This task
                       assumes that the service has been built and prepared
                       for distribution.

   publish[:[tags]]  : Publishes a packaged docker image to a docker registry.
                       This assumes that docker credentials have been set up
                       and that the image has already been created using the
                       package task.
                       Additional tags to associate with the image may be
                       given, separated by colons. The image is always tagged
                       and published with the current project version,
                       whether or not additional tags are specified.

   bump[:major|minor]: Updates the version number of the package. By default
                       only the patch version is incremented. The major and
                       minor version numbers are incremented by specifying the
                       \"major\" or \"minor\" subtask; \"prerelease\" creates or
                       advances a release candidate.

 Several tasks may be given in one invocation; they run in order and the
 first failure stops the run.
--------------------------------------------------------------------------------";
